pub mod auth;
pub mod block;
pub mod friendship;
pub mod health;
pub mod instance;
pub mod save;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                    register (public)
/// /auth/login                       login (public)
/// /auth/change-password             change password
/// /auth/me                          current user
///
/// /saves                            list, save slot
/// /saves/{slot_name}                get, delete slot
///
/// /friendships/requests             send request
/// /friendships/requests/pending     incoming pending requests
/// /friendships/requests/sent        outgoing pending requests
/// /friendships/requests/{id}/accept accept request
/// /friendships/requests/{id}/decline decline request
/// /friendships/requests/{id}        cancel request (DELETE)
/// /friendships/friends              list friends
/// /friendships/friends/{user_id}    unfriend (DELETE)
///
/// /blocks                           block user, list blocks
/// /blocks/{blocked_user_id}         unblock (DELETE)
///
/// /instances                        list mine, create
/// /instances/browse                 discoverable instances
/// /instances/{id}                   get, update, delete
/// /instances/{id}/world-view        shared world state
/// /instances/{id}/player-data       member overview, own data
/// /instances/{id}/alliances         alliances within the instance
/// /instances/{id}/marketplace       listings, search, purchase
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/saves", save::router())
        .nest("/friendships", friendship::router())
        .nest("/blocks", block::router())
        .nest("/instances", instance::router())
}
