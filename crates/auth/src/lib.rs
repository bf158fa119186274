//! `crewdir-auth` — identity boundary (principal, claims, sessions, OIDC).
//!
//! This crate is intentionally decoupled from HTTP routing and storage:
//! the API layer owns cookies and redirects, this crate owns who the
//! authenticated principal is and how the provider handshake is performed.

pub mod claims;
pub mod oidc;
pub mod principal;
pub mod session;

pub use claims::UserClaims;
pub use oidc::{HttpOidcProvider, OidcConfig, OidcError, OidcProvider};
pub use principal::{Principal, PrincipalKey};
pub use session::{SessionId, SessionStore};
