//! Home view and the login/logout flow.
//!
//! State machine: Anonymous -> (redirect to provider) -> callback ->
//! Authenticated -> Anonymous on logout. The provider handshake itself is
//! delegated; these handlers only issue the redirect, consume the
//! callback, and keep the session registry in step.

use axum::{
    extract::{Extension, Query, State},
    http::header,
    response::{AppendHeaders, IntoResponse, Redirect},
    Json,
};
use uuid::Uuid;

use crewdir_auth::Principal;

use crate::app::dto::{CallbackParams, HomeDocument};
use crate::app::errors::ApiError;
use crate::app::AppState;
use crate::context::{PrincipalContext, SessionContext};
use crate::middleware;

/// `GET /` — anonymous sessions are sent to login; authenticated ones get
/// the department listing plus any pending notices.
pub async fn home(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<axum::response::Response, ApiError> {
    if !principal.is_authenticated() {
        return Ok(Redirect::to("/login").into_response());
    }

    let departments = state.store.list_departments().await?;
    let notices = state.sessions.take_notices(&session.session_id());

    Ok(Json(HomeDocument {
        departments,
        notices,
    })
    .into_response())
}

/// `GET /login` — start the provider handshake.
///
/// A session that is already authenticated gets 404 (duplicate-login
/// guard) and no provider redirect.
pub async fn login(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Extension(principal): Extension<PrincipalContext>,
) -> Result<Redirect, ApiError> {
    if principal.is_authenticated() {
        return Err(ApiError::DuplicateLogin);
    }

    let nonce = Uuid::new_v4().to_string();
    state
        .sessions
        .set_login_state(&session.session_id(), nonce.clone());

    let url = state.oidc.authorize_url(&nonce);
    Ok(Redirect::to(url.as_str()))
}

/// `GET /login/callback` — finish the handshake and provision the user.
///
/// Order matters: claims -> session principal -> `sync_user` ->
/// `assign_role` -> redirect. Both provisioning calls must complete before
/// the redirect is issued; a failure surfaces as 502 instead.
pub async fn callback(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, ApiError> {
    let session_id = session.session_id();

    let expected = state
        .sessions
        .take_login_state(&session_id)
        .ok_or_else(|| ApiError::BadCallback("no login in progress".to_string()))?;
    if expected != params.state {
        return Err(ApiError::BadCallback("state mismatch".to_string()));
    }

    let claims = state.oidc.exchange_code(&params.code).await?;
    let principal = Principal::from_claims(claims);
    let key = principal.key.clone();

    state.sessions.set_principal(&session_id, principal);

    // One-time provisioning: the policy engine learns the user, then the
    // default role. Repeated logins re-issue both calls; the remote side
    // is idempotent.
    state
        .policy
        .sync_user(key.as_str(), key.as_str())
        .await
        .map_err(|e| ApiError::Provisioning(e.to_string()))?;
    state
        .policy
        .assign_role(
            key.as_str(),
            &state.config.default_role,
            &state.config.default_tenant,
        )
        .await
        .map_err(|e| ApiError::Provisioning(e.to_string()))?;

    tracing::info!(user = %key, "login completed");
    Ok(Redirect::to("/"))
}

/// `GET /logout` — drop the session and chain through the provider's
/// logout endpoint so its own session ends too.
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> impl IntoResponse {
    state.sessions.clear(&session.session_id());

    let url = state.oidc.logout_url(&state.config.home_url());
    (
        AppendHeaders([(header::SET_COOKIE, middleware::expired_session_cookie())]),
        Redirect::to(url.as_str()),
    )
}
