use serde::{Deserialize, Serialize};

use crate::claims::UserClaims;

/// Unique key of an authenticated principal.
///
/// The identity provider guarantees uniqueness of the email claim, so the
/// key is an email-like opaque string at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalKey(String);

impl PrincipalKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PrincipalKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PrincipalKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An authenticated principal for the lifetime of a browser session.
///
/// Materialized exactly once per session at login-callback time from
/// provider-issued claims; held in session state until logout and never
/// persisted beyond it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub key: PrincipalKey,
    pub claims: UserClaims,
}

impl Principal {
    /// Build a principal from provider claims. The email claim is the key.
    pub fn from_claims(claims: UserClaims) -> Self {
        Self {
            key: PrincipalKey::new(claims.email.clone()),
            claims,
        }
    }
}
