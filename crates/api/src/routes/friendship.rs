//! Route definitions for the `/friendships` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::friendship;
use crate::state::AppState;

/// Routes mounted at `/friendships`.
///
/// ```text
/// POST   /requests                 send a friend request
/// GET    /requests/pending         incoming pending requests
/// GET    /requests/sent            outgoing pending requests
/// POST   /requests/{id}/accept     accept (addressee only)
/// POST   /requests/{id}/decline    decline (addressee only)
/// DELETE /requests/{id}            cancel (requester only)
/// GET    /friends                  accepted friendships
/// DELETE /friends/{user_id}        unfriend
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/requests", post(friendship::send_request))
        .route("/requests/pending", get(friendship::list_pending))
        .route("/requests/sent", get(friendship::list_sent))
        .route("/requests/{id}/accept", post(friendship::accept_request))
        .route("/requests/{id}/decline", post(friendship::decline_request))
        .route("/requests/{id}", delete(friendship::cancel_request))
        .route("/friends", get(friendship::list_friends))
        .route("/friends/{user_id}", delete(friendship::unfriend))
}
