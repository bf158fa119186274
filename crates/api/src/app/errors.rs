//! Consistent JSON error responses.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crewdir_auth::OidcError;
use crewdir_core::DomainError;
use crewdir_directory::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No principal in the session; surfaced before any policy call.
    #[error("user not logged in")]
    Unauthenticated,

    /// Policy denied (or the decision could not be obtained — fail-closed).
    #[error("access denied")]
    Forbidden,

    /// Login entry point hit by an already-authenticated session.
    #[error("not found")]
    DuplicateLogin,

    /// The requested record does not exist.
    #[error("not found")]
    NotFound,

    /// Request payload failed validation.
    #[error("{0}")]
    Validation(String),

    /// OIDC `state` mismatch or missing callback parameters.
    #[error("invalid login callback: {0}")]
    BadCallback(String),

    /// The identity provider handshake failed.
    #[error("identity provider error: {0}")]
    Oidc(#[from] OidcError),

    /// Post-login provisioning against the policy engine failed.
    #[error("policy engine provisioning failed: {0}")]
    Provisioning(String),

    /// The record store failed.
    #[error("storage error: {0}")]
    Store(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound => Self::NotFound,
            DomainError::Validation(msg) | DomainError::InvalidId(msg) | DomainError::Conflict(msg) => {
                Self::Validation(msg)
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            StoreError::Backend(msg) => Self::Store(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = match &self {
            Self::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthenticated"),
            Self::Forbidden => (StatusCode::FORBIDDEN, "forbidden"),
            Self::DuplicateLogin | Self::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            Self::BadCallback(_) => (StatusCode::BAD_REQUEST, "bad_callback"),
            Self::Oidc(_) => (StatusCode::BAD_GATEWAY, "identity_provider_error"),
            Self::Provisioning(_) => (StatusCode::BAD_GATEWAY, "provisioning_error"),
            Self::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
        };

        json_error(status, code, self.to_string())
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
