use axum::{
    routing::get,
    Router,
};

use crate::app::AppState;

pub mod auth;
pub mod departments;
pub mod employees;
pub mod system;

/// Router for all session-scoped routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::home))
        .route("/login", get(auth::login))
        .route("/login/callback", get(auth::callback))
        .route("/logout", get(auth::logout))
        .nest("/departments", departments::router())
        .nest("/employees", employees::router())
}
