//! Environment-driven process configuration.
//!
//! All settings come from environment variables read once at startup.
//! Required variables fail startup with a named error instead of a later
//! mid-request surprise.

use std::time::Duration;

use anyhow::Context;

use crewdir_auth::OidcConfig;
use crewdir_policy::PdpConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address the server binds, e.g. `0.0.0.0:8080`.
    pub bind_addr: String,
    /// Externally reachable base URL (provider redirects land here).
    pub public_url: String,
    pub oidc: OidcConfig,
    pub pdp: PdpConfig,
    /// Role granted to every newly provisioned principal.
    pub default_role: String,
    /// Tenant the default role is granted in.
    pub default_tenant: String,
}

fn required(name: &str) -> anyhow::Result<String> {
    std::env::var(name).with_context(|| format!("{name} must be set"))
}

fn optional(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let public_url = optional("CREWDIR_PUBLIC_URL", "http://localhost:8080");
        let public_url = public_url.trim_end_matches('/').to_string();

        let oidc = OidcConfig {
            domain: required("AUTH0_DOMAIN")?,
            client_id: required("AUTH0_CLIENT_ID")?,
            client_secret: required("AUTH0_CLIENT_SECRET")?,
            redirect_url: format!("{public_url}/login/callback"),
        };

        let timeout_ms: u64 = optional("CREWDIR_PDP_TIMEOUT_MS", "5000")
            .parse()
            .context("CREWDIR_PDP_TIMEOUT_MS must be an integer (milliseconds)")?;

        let pdp = PdpConfig {
            base_url: optional("PDP_URL", "http://localhost:7766"),
            api_key: required("PDP_API_KEY")?,
            timeout: Duration::from_millis(timeout_ms),
        };

        Ok(Self {
            bind_addr: optional("CREWDIR_BIND", "0.0.0.0:8080"),
            public_url,
            oidc,
            pdp,
            default_role: optional("CREWDIR_DEFAULT_ROLE", "administrator"),
            default_tenant: optional("CREWDIR_DEFAULT_TENANT", "default"),
        })
    }

    /// Absolute URL of the home view (provider logout returns here).
    pub fn home_url(&self) -> String {
        format!("{}/", self.public_url)
    }
}
