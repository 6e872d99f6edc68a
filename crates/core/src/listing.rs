//! Marketplace listing state machine guards and search pagination.
//!
//! Active is the only non-terminal state. The repository applies
//! update/cancel/purchase as conditional single-statement writes keyed on
//! `status = 'active'`, so a caller that loses a race observes the listing
//! already out of Active and reports it as an invalid-state transition.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Lifecycle status of a marketplace listing.
///
/// `Expired` is a reachable terminal value (reserved for external batch
/// jobs); no operation in this backend transitions a listing into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "listing_status", rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    Sold,
    Cancelled,
    Expired,
}

/// Decide whether `actor` may modify an Active listing's data.
pub fn check_update(actor: DbId, seller_id: DbId, status: ListingStatus) -> Result<(), CoreError> {
    if actor != seller_id {
        return Err(CoreError::Forbidden(
            "Only the seller can update this listing.".to_string(),
        ));
    }
    match status {
        ListingStatus::Active => Ok(()),
        ListingStatus::Sold | ListingStatus::Cancelled | ListingStatus::Expired => Err(
            CoreError::InvalidState("Can only update active listings".to_string()),
        ),
    }
}

/// Decide whether `actor` may cancel the listing.
pub fn check_cancel(actor: DbId, seller_id: DbId, status: ListingStatus) -> Result<(), CoreError> {
    if actor != seller_id {
        return Err(CoreError::Forbidden(
            "Only the seller can cancel this listing.".to_string(),
        ));
    }
    match status {
        ListingStatus::Active => Ok(()),
        ListingStatus::Sold | ListingStatus::Cancelled | ListingStatus::Expired => Err(
            CoreError::InvalidState("Can only cancel active listings".to_string()),
        ),
    }
}

/// Decide whether `buyer` may purchase the listing.
pub fn check_purchase(buyer: DbId, seller_id: DbId, status: ListingStatus) -> Result<(), CoreError> {
    match status {
        ListingStatus::Active => {}
        ListingStatus::Sold | ListingStatus::Cancelled | ListingStatus::Expired => {
            return Err(CoreError::InvalidState(
                "Listing is not available for purchase".to_string(),
            ));
        }
    }
    if buyer == seller_id {
        return Err(CoreError::SelfReference(
            "Cannot purchase your own listing".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Search pagination
// ---------------------------------------------------------------------------

/// Default search page size.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum search page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Convert 1-indexed `page` / `page_size` into a `(limit, offset)` pair.
///
/// `page` is clamped to at least 1; `page_size` is clamped into
/// `1..=MAX_PAGE_SIZE`.
pub fn page_to_limit_offset(page: i64, page_size: i64) -> (i64, i64) {
    let page = page.max(1);
    let limit = page_size.clamp(1, MAX_PAGE_SIZE);
    (limit, (page - 1) * limit)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const SELLER: DbId = 10;
    const BUYER: DbId = 20;

    // -- check_update ----------------------------------------------------------

    #[test]
    fn seller_updates_active_listing() {
        assert!(check_update(SELLER, SELLER, ListingStatus::Active).is_ok());
    }

    #[test]
    fn non_seller_update_forbidden() {
        assert_matches!(
            check_update(BUYER, SELLER, ListingStatus::Active),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn update_terminal_states_rejected_even_for_seller() {
        for status in [
            ListingStatus::Sold,
            ListingStatus::Cancelled,
            ListingStatus::Expired,
        ] {
            assert_matches!(
                check_update(SELLER, SELLER, status),
                Err(CoreError::InvalidState(_))
            );
        }
    }

    // -- check_cancel ----------------------------------------------------------

    #[test]
    fn seller_cancels_active_listing() {
        assert!(check_cancel(SELLER, SELLER, ListingStatus::Active).is_ok());
    }

    #[test]
    fn non_seller_cancel_forbidden() {
        assert_matches!(
            check_cancel(BUYER, SELLER, ListingStatus::Active),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn cancel_sold_listing_rejected() {
        assert_matches!(
            check_cancel(SELLER, SELLER, ListingStatus::Sold),
            Err(CoreError::InvalidState(_))
        );
    }

    // -- check_purchase --------------------------------------------------------

    #[test]
    fn buyer_purchases_active_listing() {
        assert!(check_purchase(BUYER, SELLER, ListingStatus::Active).is_ok());
    }

    #[test]
    fn self_purchase_rejected() {
        assert_matches!(
            check_purchase(SELLER, SELLER, ListingStatus::Active),
            Err(CoreError::SelfReference(_))
        );
    }

    #[test]
    fn purchase_non_active_rejected_before_self_check() {
        // A sold listing reports invalid state even to its own seller.
        for status in [
            ListingStatus::Sold,
            ListingStatus::Cancelled,
            ListingStatus::Expired,
        ] {
            assert_matches!(
                check_purchase(SELLER, SELLER, status),
                Err(CoreError::InvalidState(_))
            );
        }
    }

    // -- page_to_limit_offset --------------------------------------------------

    #[test]
    fn first_page_has_zero_offset() {
        assert_eq!(page_to_limit_offset(1, 20), (20, 0));
    }

    #[test]
    fn later_pages_offset_by_page_size() {
        assert_eq!(page_to_limit_offset(3, 25), (25, 50));
    }

    #[test]
    fn page_below_one_clamped() {
        assert_eq!(page_to_limit_offset(0, 20), (20, 0));
        assert_eq!(page_to_limit_offset(-5, 20), (20, 0));
    }

    #[test]
    fn page_size_clamped_to_bounds() {
        assert_eq!(page_to_limit_offset(2, 0), (1, 1));
        assert_eq!(page_to_limit_offset(1, MAX_PAGE_SIZE + 1), (MAX_PAGE_SIZE, 0));
    }
}
