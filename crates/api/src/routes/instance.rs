//! Route definitions for the `/instances` resource.
//!
//! Also nests the per-instance world-view, player-data, alliance, and
//! marketplace routes under `/instances/{id}/...`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{alliance, instance, marketplace, player_data, world_view};
use crate::state::AppState;

/// Routes mounted at `/instances`.
///
/// ```text
/// GET    /                                      instances the caller owns or joined
/// POST   /                                      create
/// GET    /browse                                discoverable instances
/// GET    /{id}                                  get (404 when not viewable)
/// PUT    /{id}                                  update (owner only)
/// DELETE /{id}                                  delete (owner only)
///
/// GET    /{id}/world-view                       shared world state
/// PUT    /{id}/world-view                       save world state (participants)
///
/// GET    /{id}/player-data                      member overview (owner only)
/// GET    /{id}/player-data/me                   caller's player data
/// PUT    /{id}/player-data/me                   save player data (joins on first write)
/// DELETE /{id}/player-data/me                   leave the instance
///
/// GET    /{id}/alliances                        list (participants)
/// POST   /{id}/alliances                        create (participants)
/// GET    /{id}/alliances/{alliance_id}          get
/// PUT    /{id}/alliances/{alliance_id}          update
/// DELETE /{id}/alliances/{alliance_id}          delete
///
/// GET    /{id}/marketplace                      active listings
/// POST   /{id}/marketplace                      create listing
/// GET    /{id}/marketplace/my-listings          caller's listings, any status
/// GET    /{id}/marketplace/search               filtered, paginated search
/// GET    /{id}/marketplace/{listing_id}         get listing
/// PUT    /{id}/marketplace/{listing_id}         update listing (seller, active only)
/// POST   /{id}/marketplace/{listing_id}/cancel  cancel listing (seller, active only)
/// POST   /{id}/marketplace/{listing_id}/purchase  purchase (first caller wins)
/// ```
pub fn router() -> Router<AppState> {
    let player_data_routes = Router::new()
        .route("/", get(player_data::list))
        .route(
            "/me",
            get(player_data::get_mine)
                .put(player_data::save_mine)
                .delete(player_data::delete_mine),
        );

    let alliance_routes = Router::new()
        .route("/", get(alliance::list).post(alliance::create))
        .route(
            "/{alliance_id}",
            get(alliance::get_by_id)
                .put(alliance::update)
                .delete(alliance::delete),
        );

    let marketplace_routes = Router::new()
        .route("/", get(marketplace::list_active).post(marketplace::create))
        .route("/my-listings", get(marketplace::my_listings))
        .route("/search", get(marketplace::search))
        .route("/{listing_id}", get(marketplace::get_by_id).put(marketplace::update))
        .route("/{listing_id}/cancel", post(marketplace::cancel))
        .route("/{listing_id}/purchase", post(marketplace::purchase));

    Router::new()
        .route("/", get(instance::list_mine).post(instance::create))
        .route("/browse", get(instance::browse))
        .route(
            "/{id}",
            get(instance::get_by_id)
                .put(instance::update)
                .delete(instance::delete),
        )
        .route("/{id}/world-view", put(world_view::save).get(world_view::get))
        .nest("/{id}/player-data", player_data_routes)
        .nest("/{id}/alliances", alliance_routes)
        .nest("/{id}/marketplace", marketplace_routes)
}
