//! Route definitions for the `/auth` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /register         -> register (public)
/// POST /login            -> login (public)
/// POST /change-password  -> change password (requires auth)
/// GET  /me               -> current user (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/change-password", post(auth::change_password))
        .route("/me", get(auth::me))
}
