//! Marketplace listing entity model and DTOs.

use serde::{Deserialize, Serialize};
use skirmish_core::listing::ListingStatus;
use skirmish_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full listing row, payloads included. `buyer_id` is set iff the listing
/// is sold.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MarketplaceListing {
    pub id: DbId,
    pub game_instance_id: DbId,
    pub seller_id: DbId,
    pub buyer_id: Option<DbId>,
    pub item_data: serde_json::Value,
    pub purchase_conditions: serde_json::Value,
    pub status: ListingStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing row without the opaque payloads, for browse/search results.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListingSummary {
    pub id: DbId,
    pub game_instance_id: DbId,
    pub seller_id: DbId,
    pub buyer_id: Option<DbId>,
    pub status: ListingStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a listing. `purchase_conditions` defaults to `{}`.
#[derive(Debug, Deserialize)]
pub struct CreateListing {
    pub item_data: serde_json::Value,
    pub purchase_conditions: Option<serde_json::Value>,
}

/// DTO for updating an active listing. Omitted fields are unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateListing {
    pub item_data: Option<serde_json::Value>,
    pub purchase_conditions: Option<serde_json::Value>,
}
