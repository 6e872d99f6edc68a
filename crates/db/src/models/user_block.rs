//! User block entity model.

use serde::{Deserialize, Serialize};
use skirmish_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full block row from the `user_blocks` table. Directional: a row means
/// `blocker_id` refuses interaction with `blocked_user_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserBlock {
    pub id: DbId,
    pub blocker_id: DbId,
    pub blocked_user_id: DbId,
    pub created_at: Timestamp,
}

/// Block row with the blocked user's display name resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlockedUserRow {
    pub id: DbId,
    pub blocked_user_id: DbId,
    pub display_name: String,
    pub created_at: Timestamp,
}

/// Request body for blocking a user.
#[derive(Debug, Deserialize)]
pub struct BlockUserRequest {
    pub blocked_user_id: DbId,
}
