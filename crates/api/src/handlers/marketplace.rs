//! Handlers for the per-instance `/marketplace` resource.
//!
//! Anyone who can view the instance can trade. Transitions out of Active
//! (update, cancel, purchase) go through a guard on a fetched snapshot for
//! precise errors, then a conditional update keyed on `status = 'active'`;
//! a `None` result means another caller transitioned the listing first.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use skirmish_core::error::CoreError;
use skirmish_core::listing::{self, ListingStatus, DEFAULT_PAGE_SIZE};
use skirmish_core::types::DbId;
use skirmish_db::models::marketplace::{CreateListing, MarketplaceListing, UpdateListing};
use skirmish_db::repositories::MarketplaceListingRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::instance;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET .../marketplace/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub status: Option<ListingStatus>,
    pub seller_id: Option<DbId>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

async fn fetch_listing(
    state: &AppState,
    instance_id: DbId,
    listing_id: DbId,
) -> AppResult<MarketplaceListing> {
    MarketplaceListingRepo::find(&state.pool, instance_id, listing_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Listing",
            id: listing_id,
        }))
}

/// POST /api/v1/instances/{id}/marketplace
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateListing>,
) -> AppResult<(StatusCode, Json<MarketplaceListing>)> {
    instance::fetch_for_nested(&state, user.user_id, id).await?;

    let listing = MarketplaceListingRepo::create(&state.pool, id, user.user_id, &input).await?;
    tracing::info!(listing_id = listing.id, seller_id = user.user_id, "Listing created");
    Ok((StatusCode::CREATED, Json(listing)))
}

/// GET /api/v1/instances/{id}/marketplace
pub async fn list_active(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    instance::fetch_for_nested(&state, user.user_id, id).await?;

    let listings = MarketplaceListingRepo::list_active(&state.pool, id).await?;
    Ok(Json(json!({ "listings": listings })))
}

/// GET /api/v1/instances/{id}/marketplace/my-listings
pub async fn my_listings(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    instance::fetch_for_nested(&state, user.user_id, id).await?;

    let listings = MarketplaceListingRepo::list_for_seller(&state.pool, id, user.user_id).await?;
    Ok(Json(json!({ "listings": listings })))
}

/// GET /api/v1/instances/{id}/marketplace/search
pub async fn search(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<serde_json::Value>> {
    instance::fetch_for_nested(&state, user.user_id, id).await?;

    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    let (limit, offset) = listing::page_to_limit_offset(page, page_size);

    let listings = MarketplaceListingRepo::search(
        &state.pool,
        id,
        params.status,
        params.seller_id,
        limit,
        offset,
    )
    .await?;

    Ok(Json(json!({
        "listings": listings,
        "page": page.max(1),
        "page_size": limit,
    })))
}

/// GET /api/v1/instances/{id}/marketplace/{listing_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, listing_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<MarketplaceListing>> {
    instance::fetch_for_nested(&state, user.user_id, id).await?;
    let listing = fetch_listing(&state, id, listing_id).await?;
    Ok(Json(listing))
}

/// PUT /api/v1/instances/{id}/marketplace/{listing_id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, listing_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateListing>,
) -> AppResult<Json<MarketplaceListing>> {
    instance::fetch_for_nested(&state, user.user_id, id).await?;

    let snapshot = fetch_listing(&state, id, listing_id).await?;
    listing::check_update(user.user_id, snapshot.seller_id, snapshot.status)?;

    MarketplaceListingRepo::update_active(&state.pool, id, listing_id, &input)
        .await?
        .map(Json)
        .ok_or(AppError::Core(CoreError::InvalidState(
            "Can only update active listings".into(),
        )))
}

/// POST /api/v1/instances/{id}/marketplace/{listing_id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, listing_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<MarketplaceListing>> {
    instance::fetch_for_nested(&state, user.user_id, id).await?;

    let snapshot = fetch_listing(&state, id, listing_id).await?;
    listing::check_cancel(user.user_id, snapshot.seller_id, snapshot.status)?;

    MarketplaceListingRepo::cancel_active(&state.pool, id, listing_id)
        .await?
        .map(Json)
        .ok_or(AppError::Core(CoreError::InvalidState(
            "Can only cancel active listings".into(),
        )))
}

/// POST /api/v1/instances/{id}/marketplace/{listing_id}/purchase
///
/// Exactly one of any number of concurrent purchasers wins; the rest see
/// the listing as no longer available.
pub async fn purchase(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, listing_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<MarketplaceListing>> {
    instance::fetch_for_nested(&state, user.user_id, id).await?;

    let snapshot = fetch_listing(&state, id, listing_id).await?;
    listing::check_purchase(user.user_id, snapshot.seller_id, snapshot.status)?;

    let sold =
        MarketplaceListingRepo::purchase_active(&state.pool, id, listing_id, user.user_id)
            .await?
            .ok_or(AppError::Core(CoreError::InvalidState(
                "Listing is not available for purchase".into(),
            )))?;

    tracing::info!(
        listing_id,
        buyer_id = user.user_id,
        seller_id = sold.seller_id,
        "Listing purchased"
    );
    Ok(Json(sold))
}
