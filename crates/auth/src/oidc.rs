//! OpenID-Connect provider boundary.
//!
//! The handshake itself is the provider's business: crewdir only issues
//! the authorize redirect, exchanges the callback code for tokens on the
//! back channel, and reads the claims from the userinfo endpoint. The
//! trait seam exists so route tests can run against a scripted provider.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::claims::UserClaims;

#[derive(Debug, Error)]
pub enum OidcError {
    /// Token or userinfo endpoint could not be reached.
    #[error("identity provider unreachable: {0}")]
    Unreachable(String),

    /// The provider answered with a non-success status.
    #[error("identity provider rejected the request: {0}")]
    Rejected(String),

    /// The provider response could not be decoded.
    #[error("malformed identity provider response: {0}")]
    Malformed(String),

    /// The claims carry no email; crewdir cannot key the principal.
    #[error("identity token is missing the email claim")]
    MissingEmailClaim,
}

/// Identity-provider handshake operations needed by the login routes.
#[async_trait]
pub trait OidcProvider: Send + Sync {
    /// Provider authorize endpoint with client id, redirect URI, scopes and
    /// the anti-forgery `state` nonce.
    fn authorize_url(&self, state: &str) -> Url;

    /// Exchange the callback authorization code for claims.
    async fn exchange_code(&self, code: &str) -> Result<UserClaims, OidcError>;

    /// Provider logout endpoint, returning to `return_to` afterwards.
    fn logout_url(&self, return_to: &str) -> Url;
}

/// Static provider settings supplied by environment configuration.
#[derive(Debug, Clone)]
pub struct OidcConfig {
    /// Provider tenant domain, e.g. `example.eu.auth0.com`.
    pub domain: String,
    pub client_id: String,
    pub client_secret: String,
    /// Absolute callback URL registered with the provider.
    pub redirect_url: String,
}

/// `OidcProvider` over HTTPS against an Auth0-compatible tenant.
pub struct HttpOidcProvider {
    config: OidcConfig,
    base: Url,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

impl HttpOidcProvider {
    /// Fails when the configured domain does not form a valid base URL, so
    /// a bad deployment is caught at startup rather than mid-login.
    pub fn new(config: OidcConfig, http: reqwest::Client) -> Result<Self, OidcError> {
        let base = Url::parse(&format!("https://{}/", config.domain))
            .map_err(|e| OidcError::Malformed(format!("invalid provider domain: {e}")))?;
        Ok(Self { config, base, http })
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(path);
        url
    }
}

#[async_trait]
impl OidcProvider for HttpOidcProvider {
    fn authorize_url(&self, state: &str) -> Url {
        let mut url = self.endpoint("/authorize");
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_url)
            .append_pair("scope", "openid profile email")
            .append_pair("state", state);
        url
    }

    async fn exchange_code(&self, code: &str) -> Result<UserClaims, OidcError> {
        let token_url = self.endpoint("/oauth/token");
        let response = self
            .http
            .post(token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.config.redirect_url.as_str()),
            ])
            .send()
            .await
            .map_err(|e| OidcError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OidcError::Rejected(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| OidcError::Malformed(e.to_string()))?;

        let userinfo = self
            .http
            .get(self.endpoint("/userinfo"))
            .bearer_auth(&token.access_token)
            .send()
            .await
            .map_err(|e| OidcError::Unreachable(e.to_string()))?;

        if !userinfo.status().is_success() {
            return Err(OidcError::Rejected(format!(
                "userinfo endpoint returned {}",
                userinfo.status()
            )));
        }

        let value: serde_json::Value = userinfo
            .json()
            .await
            .map_err(|e| OidcError::Malformed(e.to_string()))?;

        if value.get("email").and_then(|v| v.as_str()).is_none() {
            return Err(OidcError::MissingEmailClaim);
        }

        let claims: UserClaims =
            serde_json::from_value(value).map_err(|e| OidcError::Malformed(e.to_string()))?;
        tracing::debug!(email = %claims.email, "code exchange completed");
        Ok(claims)
    }

    fn logout_url(&self, return_to: &str) -> Url {
        let mut url = self.endpoint("/v2/logout");
        url.query_pairs_mut()
            .append_pair("returnTo", return_to)
            .append_pair("client_id", &self.config.client_id);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_provider() -> HttpOidcProvider {
        HttpOidcProvider::new(
            OidcConfig {
                domain: "tenant.example.auth0.com".to_string(),
                client_id: "client-123".to_string(),
                client_secret: "secret".to_string(),
                redirect_url: "http://localhost:8080/login/callback".to_string(),
            },
            reqwest::Client::new(),
        )
        .unwrap()
    }

    #[test]
    fn authorize_url_carries_code_flow_parameters() {
        let url = test_provider().authorize_url("nonce-1");
        assert_eq!(url.host_str(), Some("tenant.example.auth0.com"));
        assert_eq!(url.path(), "/authorize");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("response_type".into(), "code".into())));
        assert!(pairs.contains(&("client_id".into(), "client-123".into())));
        assert!(pairs.contains(&("scope".into(), "openid profile email".into())));
        assert!(pairs.contains(&("state".into(), "nonce-1".into())));
    }

    #[test]
    fn logout_url_encodes_return_target() {
        let url = test_provider().logout_url("http://localhost:8080/");
        assert_eq!(url.path(), "/v2/logout");
        // query_pairs_mut percent-encodes the embedded URL
        assert!(url.as_str().contains("returnTo=http%3A%2F%2Flocalhost%3A8080%2F"));
        assert!(url.as_str().contains("client_id=client-123"));
    }
}
