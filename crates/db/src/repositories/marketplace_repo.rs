//! Repository for the `marketplace_listings` table.
//!
//! State transitions out of `active` (update, cancel, purchase) are
//! expressed as single conditional `UPDATE ... WHERE status = 'active'`
//! statements so that two concurrent callers cannot both win: the loser's
//! statement matches zero rows and surfaces as `None`.

use sqlx::PgPool;
use skirmish_core::listing::ListingStatus;
use skirmish_core::types::DbId;

use crate::models::marketplace::{
    CreateListing, ListingSummary, MarketplaceListing, UpdateListing,
};

const COLUMNS: &str = "id, game_instance_id, seller_id, buyer_id, item_data, \
                       purchase_conditions, status, created_at, updated_at";

const SUMMARY_COLUMNS: &str =
    "id, game_instance_id, seller_id, buyer_id, status, created_at, updated_at";

/// Provides CRUD and lifecycle operations for marketplace listings.
pub struct MarketplaceListingRepo;

impl MarketplaceListingRepo {
    /// Insert a new active listing, returning the created row. Omitted
    /// purchase conditions become an empty object.
    pub async fn create(
        pool: &PgPool,
        instance_id: DbId,
        seller_id: DbId,
        input: &CreateListing,
    ) -> Result<MarketplaceListing, sqlx::Error> {
        let query = format!(
            "INSERT INTO marketplace_listings
                 (game_instance_id, seller_id, item_data, purchase_conditions)
             VALUES ($1, $2, $3, COALESCE($4, '{{}}'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarketplaceListing>(&query)
            .bind(instance_id)
            .bind(seller_id)
            .bind(&input.item_data)
            .bind(&input.purchase_conditions)
            .fetch_one(pool)
            .await
    }

    /// Find a listing scoped to its instance.
    pub async fn find(
        pool: &PgPool,
        instance_id: DbId,
        listing_id: DbId,
    ) -> Result<Option<MarketplaceListing>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM marketplace_listings
             WHERE game_instance_id = $1 AND id = $2"
        );
        sqlx::query_as::<_, MarketplaceListing>(&query)
            .bind(instance_id)
            .bind(listing_id)
            .fetch_optional(pool)
            .await
    }

    /// All active listings in an instance, newest first, payloads omitted.
    pub async fn list_active(
        pool: &PgPool,
        instance_id: DbId,
    ) -> Result<Vec<ListingSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM marketplace_listings
             WHERE game_instance_id = $1 AND status = 'active'
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ListingSummary>(&query)
            .bind(instance_id)
            .fetch_all(pool)
            .await
    }

    /// A seller's own listings in an instance, any status, newest first.
    pub async fn list_for_seller(
        pool: &PgPool,
        instance_id: DbId,
        seller_id: DbId,
    ) -> Result<Vec<ListingSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM marketplace_listings
             WHERE game_instance_id = $1 AND seller_id = $2
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ListingSummary>(&query)
            .bind(instance_id)
            .bind(seller_id)
            .fetch_all(pool)
            .await
    }

    /// Paginated listing search with optional status and seller filters,
    /// newest first.
    pub async fn search(
        pool: &PgPool,
        instance_id: DbId,
        status: Option<ListingStatus>,
        seller_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ListingSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM marketplace_listings
             WHERE game_instance_id = $1
               AND ($2::listing_status IS NULL OR status = $2)
               AND ($3::bigint IS NULL OR seller_id = $3)
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, ListingSummary>(&query)
            .bind(instance_id)
            .bind(status)
            .bind(seller_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial edit to a listing if it is still active. Returns
    /// `None` when the listing is missing or no longer active.
    pub async fn update_active(
        pool: &PgPool,
        instance_id: DbId,
        listing_id: DbId,
        input: &UpdateListing,
    ) -> Result<Option<MarketplaceListing>, sqlx::Error> {
        let query = format!(
            "UPDATE marketplace_listings
             SET item_data = COALESCE($3, item_data),
                 purchase_conditions = COALESCE($4, purchase_conditions),
                 updated_at = NOW()
             WHERE game_instance_id = $1 AND id = $2 AND status = 'active'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarketplaceListing>(&query)
            .bind(instance_id)
            .bind(listing_id)
            .bind(&input.item_data)
            .bind(&input.purchase_conditions)
            .fetch_optional(pool)
            .await
    }

    /// Cancel a listing if it is still active.
    pub async fn cancel_active(
        pool: &PgPool,
        instance_id: DbId,
        listing_id: DbId,
    ) -> Result<Option<MarketplaceListing>, sqlx::Error> {
        let query = format!(
            "UPDATE marketplace_listings
             SET status = 'cancelled', updated_at = NOW()
             WHERE game_instance_id = $1 AND id = $2 AND status = 'active'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarketplaceListing>(&query)
            .bind(instance_id)
            .bind(listing_id)
            .fetch_optional(pool)
            .await
    }

    /// Mark a listing as sold to `buyer_id` if it is still active. At most
    /// one concurrent caller gets `Some`.
    pub async fn purchase_active(
        pool: &PgPool,
        instance_id: DbId,
        listing_id: DbId,
        buyer_id: DbId,
    ) -> Result<Option<MarketplaceListing>, sqlx::Error> {
        let query = format!(
            "UPDATE marketplace_listings
             SET status = 'sold', buyer_id = $3, updated_at = NOW()
             WHERE game_instance_id = $1 AND id = $2 AND status = 'active'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MarketplaceListing>(&query)
            .bind(instance_id)
            .bind(listing_id)
            .bind(buyer_id)
            .fetch_optional(pool)
            .await
    }
}
