//! Route definitions for the `/blocks` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::block;
use crate::state::AppState;

/// Routes mounted at `/blocks`.
///
/// ```text
/// POST   /                      block a user
/// GET    /                      list users the caller has blocked
/// DELETE /{blocked_user_id}     unblock a user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(block::block_user).get(block::list_blocks))
        .route("/{blocked_user_id}", delete(block::unblock_user))
}
