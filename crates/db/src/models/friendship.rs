//! Friendship entity model and response rows.

use serde::{Deserialize, Serialize};
use skirmish_core::social::FriendshipStatus;
use skirmish_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full friendship row from the `friendships` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Friendship {
    pub id: DbId,
    pub requester_id: DbId,
    pub addressee_id: DbId,
    pub status: FriendshipStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Friend-request row with both parties' display names resolved, as exposed
/// by the request endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FriendRequestRow {
    pub id: DbId,
    pub requester_id: DbId,
    pub requester_display_name: String,
    pub addressee_id: DbId,
    pub addressee_display_name: String,
    pub status: FriendshipStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An accepted friendship resolved to "the other party" from one user's
/// point of view. `since` is the acceptance time (`updated_at`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FriendRow {
    pub friendship_id: DbId,
    pub user_id: DbId,
    pub display_name: String,
    pub since: Timestamp,
}

/// Request body for sending a friend request.
#[derive(Debug, Deserialize)]
pub struct SendFriendRequest {
    pub addressee_id: DbId,
}
