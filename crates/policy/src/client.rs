//! Remote policy decision point (PDP) client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::resource::{ActionName, ResourceId};

#[derive(Debug, Error)]
pub enum PolicyError {
    /// The PDP could not be reached (connect failure, timeout).
    #[error("policy engine unreachable: {0}")]
    Unreachable(String),

    /// The PDP answered, but not with a usable decision.
    #[error("policy engine protocol error: {0}")]
    Protocol(String),
}

/// Remote authorization capability.
///
/// Decisions are consumed immediately by the enforcement gate: they are
/// never cached and never retried. Callers must treat any `Err` as deny.
#[async_trait]
pub trait PolicyClient: Send + Sync {
    /// `check(user, resource, action, context) -> allow/deny`.
    async fn check(
        &self,
        user: &str,
        resource: &ResourceId,
        action: &ActionName,
        context: Option<&Value>,
    ) -> Result<bool, PolicyError>;

    /// Provisioning: register the user in the engine's user registry.
    async fn sync_user(&self, key: &str, email: &str) -> Result<(), PolicyError>;

    /// Provisioning: grant `role` to `user` within `tenant`.
    async fn assign_role(&self, user: &str, role: &str, tenant: &str) -> Result<(), PolicyError>;
}

/// Static PDP settings supplied by environment configuration.
#[derive(Debug, Clone)]
pub struct PdpConfig {
    /// Base URL of the PDP process, e.g. `http://localhost:7766`.
    pub base_url: String,
    /// Bearer token for the PDP API.
    pub api_key: String,
    /// Upper bound on any single PDP round trip.
    pub timeout: std::time::Duration,
}

/// JSON-over-HTTP `PolicyClient` against a PDP sidecar.
pub struct HttpPdpClient {
    config: PdpConfig,
    http: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct CheckRequest<'a> {
    user: &'a str,
    resource: String,
    action: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a Value>,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    allow: bool,
}

#[derive(Debug, Serialize)]
struct SyncUserRequest<'a> {
    key: &'a str,
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct AssignRoleRequest<'a> {
    user: &'a str,
    role: &'a str,
    tenant: &'a str,
}

impl HttpPdpClient {
    /// Build a client whose every request is bounded by the configured
    /// timeout, so a stalled PDP surfaces as `Unreachable` (and the gate
    /// denies) instead of pinning the request forever.
    pub fn new(config: PdpConfig) -> Result<Self, PolicyError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PolicyError::Protocol(e.to_string()))?;
        Ok(Self { config, http })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post_expect_ok<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response, PolicyError> {
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| PolicyError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PolicyError::Protocol(format!(
                "{} returned {}",
                path,
                response.status()
            )));
        }
        Ok(response)
    }
}

#[async_trait]
impl PolicyClient for HttpPdpClient {
    async fn check(
        &self,
        user: &str,
        resource: &ResourceId,
        action: &ActionName,
        context: Option<&Value>,
    ) -> Result<bool, PolicyError> {
        let request = CheckRequest {
            user,
            resource: resource.render(),
            action: action.as_str(),
            context,
        };

        let response = self.post_expect_ok("/allowed", &request).await?;
        let decision: CheckResponse = response
            .json()
            .await
            .map_err(|e| PolicyError::Protocol(e.to_string()))?;

        tracing::debug!(
            user,
            resource = %resource,
            action = %action,
            allow = decision.allow,
            "pdp decision"
        );
        Ok(decision.allow)
    }

    async fn sync_user(&self, key: &str, email: &str) -> Result<(), PolicyError> {
        self.post_expect_ok("/users/sync", &SyncUserRequest { key, email })
            .await?;
        Ok(())
    }

    async fn assign_role(&self, user: &str, role: &str, tenant: &str) -> Result<(), PolicyError> {
        self.post_expect_ok("/roles/assign", &AssignRoleRequest { user, role, tenant })
            .await?;
        Ok(())
    }
}
