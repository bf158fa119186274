//! HTTP application wiring (axum router + service state).
//!
//! Layout:
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;

use crewdir_auth::{OidcProvider, SessionStore};
use crewdir_directory::DirectoryStore;
use crewdir_policy::PolicyClient;

use crate::config::Config;
use crate::gate::PolicyGate;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;


/// Long-lived service objects, constructed once at process start and
/// passed into every request context (no module-level singletons).
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub store: Arc<dyn DirectoryStore>,
    pub policy: Arc<dyn PolicyClient>,
    pub oidc: Arc<dyn OidcProvider>,
    pub gate: Arc<PolicyGate>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        sessions: Arc<SessionStore>,
        store: Arc<dyn DirectoryStore>,
        policy: Arc<dyn PolicyClient>,
        oidc: Arc<dyn OidcProvider>,
        config: Config,
    ) -> Self {
        let gate = Arc::new(PolicyGate::new(policy.clone(), config.pdp.timeout));
        Self {
            sessions,
            store,
            policy,
            oidc,
            gate,
            config: Arc::new(config),
        }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Everything except `/health` runs behind the session middleware.
pub fn build_app(state: AppState) -> Router {
    let session_layer =
        axum::middleware::from_fn_with_state(state.clone(), middleware::session_middleware);

    Router::new()
        .merge(routes::router())
        .layer(ServiceBuilder::new().layer(session_layer))
        .route("/health", get(routes::system::health))
        .with_state(state)
}
