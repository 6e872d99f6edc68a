//! Per-player game data model. A row's existence for (instance, user) is
//! what "membership" means throughout the access policy.

use serde::{Deserialize, Serialize};
use skirmish_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full player-data row, payload included.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlayerGameData {
    pub id: DbId,
    pub game_instance_id: DbId,
    pub user_id: DbId,
    pub game_data: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing row without the payload, for the owner's member overview.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlayerGameDataSummary {
    pub id: DbId,
    pub game_instance_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for saving one's own player data.
#[derive(Debug, Deserialize)]
pub struct SavePlayerGameData {
    pub game_data: serde_json::Value,
}
