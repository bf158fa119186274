use serde::{Deserialize, Serialize};

/// Identity claims returned by the provider (transport-agnostic).
///
/// This is the minimal set crewdir expects once the provider handshake has
/// completed. Additional claims the provider returns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    /// Email claim; doubles as the principal key.
    pub email: String,

    /// Provider subject identifier, when present.
    #[serde(default)]
    pub sub: Option<String>,

    /// Display name, when present.
    #[serde(default)]
    pub name: Option<String>,
}
