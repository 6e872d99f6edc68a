//! Friendship and block state machine guards.
//!
//! The social graph stores at most one friendship record per unordered user
//! pair, plus directional block rows. Interaction between two users is
//! forbidden when a block exists in either direction. The guards in this
//! module take a snapshot of a pair's current state and decide whether a
//! transition is allowed; the repository layer applies the winning
//! transition atomically.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Lifecycle status of a friendship record.
///
/// A declined record is deleted when the pair is re-requested, so in steady
/// state a pair holds zero or one record that is either pending or accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "friendship_status", rename_all = "snake_case")]
pub enum FriendshipStatus {
    Pending,
    Accepted,
    Declined,
}

/// Snapshot of the social-graph state for one unordered user pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairState {
    /// A block row exists in either direction.
    pub blocked: bool,
    /// The single friendship record for the pair (either ordering), if any,
    /// as `(status, requester_id)`.
    pub friendship: Option<(FriendshipStatus, DbId)>,
}

/// Decide whether `requester` may send a friend request to `addressee`.
///
/// A declined record does not prevent re-requesting; the repository deletes
/// it inside the insert transaction.
pub fn check_send_request(
    requester: DbId,
    addressee: DbId,
    state: &PairState,
) -> Result<(), CoreError> {
    if requester == addressee {
        return Err(CoreError::SelfReference(
            "You cannot send a friend request to yourself.".to_string(),
        ));
    }
    if state.blocked {
        return Err(CoreError::Blocked(
            "Cannot send friend request to this user.".to_string(),
        ));
    }
    match state.friendship {
        Some((FriendshipStatus::Accepted, _)) => Err(CoreError::Conflict(
            "You are already friends with this user.".to_string(),
        )),
        Some((FriendshipStatus::Pending, _)) => Err(CoreError::Conflict(
            "A pending friend request already exists between you and this user.".to_string(),
        )),
        Some((FriendshipStatus::Declined, _)) | None => Ok(()),
    }
}

/// Decide whether `actor` may accept or decline a friend request.
///
/// Only the addressee may respond, and only while the request is pending.
pub fn check_respond(
    actor: DbId,
    addressee_id: DbId,
    status: FriendshipStatus,
) -> Result<(), CoreError> {
    if actor != addressee_id {
        return Err(CoreError::Forbidden(
            "Only the addressee can respond to this friend request.".to_string(),
        ));
    }
    match status {
        FriendshipStatus::Pending => Ok(()),
        FriendshipStatus::Accepted | FriendshipStatus::Declined => Err(CoreError::InvalidState(
            "This friend request is no longer pending.".to_string(),
        )),
    }
}

/// Decide whether `actor` may cancel a friend request they sent.
pub fn check_cancel(
    actor: DbId,
    requester_id: DbId,
    status: FriendshipStatus,
) -> Result<(), CoreError> {
    if actor != requester_id {
        return Err(CoreError::Forbidden(
            "Only the requester can cancel this friend request.".to_string(),
        ));
    }
    match status {
        FriendshipStatus::Pending => Ok(()),
        FriendshipStatus::Accepted | FriendshipStatus::Declined => Err(CoreError::InvalidState(
            "This friend request is no longer pending.".to_string(),
        )),
    }
}

/// Decide whether `blocker` may block `target`.
///
/// Blocks are directional: an existing row for this ordered pair is a
/// conflict, but a block in the opposite direction is not.
pub fn check_block(blocker: DbId, target: DbId, already_blocked: bool) -> Result<(), CoreError> {
    if blocker == target {
        return Err(CoreError::SelfReference(
            "You cannot block yourself.".to_string(),
        ));
    }
    if already_blocked {
        return Err(CoreError::Conflict(
            "You have already blocked this user.".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn pair(blocked: bool, friendship: Option<(FriendshipStatus, DbId)>) -> PairState {
        PairState { blocked, friendship }
    }

    // -- check_send_request ----------------------------------------------------

    #[test]
    fn send_request_to_fresh_pair() {
        assert!(check_send_request(1, 2, &pair(false, None)).is_ok());
    }

    #[test]
    fn send_request_to_self_rejected() {
        assert_matches!(
            check_send_request(1, 1, &pair(false, None)),
            Err(CoreError::SelfReference(_))
        );
    }

    #[test]
    fn send_request_blocked_pair_rejected() {
        assert_matches!(
            check_send_request(1, 2, &pair(true, None)),
            Err(CoreError::Blocked(_))
        );
    }

    #[test]
    fn send_request_already_friends_rejected() {
        let state = pair(false, Some((FriendshipStatus::Accepted, 2)));
        assert_matches!(check_send_request(1, 2, &state), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn send_request_pending_rejected_regardless_of_direction() {
        // Pending originally sent by the other party still counts.
        let state = pair(false, Some((FriendshipStatus::Pending, 2)));
        assert_matches!(check_send_request(1, 2, &state), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn send_request_after_decline_allowed() {
        let state = pair(false, Some((FriendshipStatus::Declined, 1)));
        assert!(check_send_request(1, 2, &state).is_ok());
    }

    #[test]
    fn send_request_self_check_wins_over_block() {
        // Self-pairs are never stored, so the self guard must fire first.
        assert_matches!(
            check_send_request(3, 3, &pair(true, None)),
            Err(CoreError::SelfReference(_))
        );
    }

    // -- check_respond ---------------------------------------------------------

    #[test]
    fn addressee_can_respond_to_pending() {
        assert!(check_respond(2, 2, FriendshipStatus::Pending).is_ok());
    }

    #[test]
    fn requester_cannot_respond() {
        assert_matches!(
            check_respond(1, 2, FriendshipStatus::Pending),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn respond_to_accepted_rejected() {
        assert_matches!(
            check_respond(2, 2, FriendshipStatus::Accepted),
            Err(CoreError::InvalidState(_))
        );
    }

    #[test]
    fn respond_to_declined_rejected() {
        assert_matches!(
            check_respond(2, 2, FriendshipStatus::Declined),
            Err(CoreError::InvalidState(_))
        );
    }

    // -- check_cancel ----------------------------------------------------------

    #[test]
    fn requester_can_cancel_pending() {
        assert!(check_cancel(1, 1, FriendshipStatus::Pending).is_ok());
    }

    #[test]
    fn addressee_cannot_cancel() {
        assert_matches!(
            check_cancel(2, 1, FriendshipStatus::Pending),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn cancel_accepted_rejected() {
        assert_matches!(
            check_cancel(1, 1, FriendshipStatus::Accepted),
            Err(CoreError::InvalidState(_))
        );
    }

    // -- check_block -----------------------------------------------------------

    #[test]
    fn block_fresh_target() {
        assert!(check_block(1, 2, false).is_ok());
    }

    #[test]
    fn block_self_rejected() {
        assert_matches!(check_block(1, 1, false), Err(CoreError::SelfReference(_)));
    }

    #[test]
    fn block_duplicate_rejected() {
        assert_matches!(check_block(1, 2, true), Err(CoreError::Conflict(_)));
    }
}
