//! World-view game data model (zero-or-one row per instance).

use serde::{Deserialize, Serialize};
use skirmish_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Shared world state for a game instance. The payload is opaque to the
/// backend.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WorldViewGameData {
    pub id: DbId,
    pub game_instance_id: DbId,
    pub game_data: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for writing world-view data.
#[derive(Debug, Deserialize)]
pub struct SaveWorldViewGameData {
    pub game_data: serde_json::Value,
}
