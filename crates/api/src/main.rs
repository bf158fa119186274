use std::sync::Arc;

use crewdir_api::app::AppState;
use crewdir_api::config::Config;
use crewdir_auth::{HttpOidcProvider, SessionStore};
use crewdir_directory::InMemoryDirectoryStore;
use crewdir_policy::HttpPdpClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    crewdir_api::telemetry::init();

    let config = Config::from_env()?;

    let oidc = HttpOidcProvider::new(config.oidc.clone(), reqwest::Client::new())
        .map_err(|e| anyhow::anyhow!("OIDC client setup failed: {e}"))?;
    let policy = HttpPdpClient::new(config.pdp.clone())
        .map_err(|e| anyhow::anyhow!("PDP client setup failed: {e}"))?;

    let store = build_store().await?;

    let state = AppState::new(
        Arc::new(SessionStore::new()),
        store,
        Arc::new(policy),
        Arc::new(oidc),
        config.clone(),
    );

    let app = crewdir_api::app::build_app(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(feature = "postgres")]
async fn build_store() -> anyhow::Result<Arc<dyn crewdir_directory::DirectoryStore>> {
    use anyhow::Context;

    match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = sqlx::PgPool::connect(&url)
                .await
                .context("failed to connect to Postgres")?;
            tracing::info!("using Postgres directory store");
            Ok(Arc::new(crewdir_directory::PgDirectoryStore::new(pool)))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory directory store");
            Ok(Arc::new(InMemoryDirectoryStore::new()))
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn build_store() -> anyhow::Result<Arc<dyn crewdir_directory::DirectoryStore>> {
    tracing::info!("using in-memory directory store");
    Ok(Arc::new(InMemoryDirectoryStore::new()))
}
