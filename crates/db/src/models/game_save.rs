//! Save-slot entity model. Owner-keyed pass-through storage; the backend
//! never inspects the payload.

use serde::{Deserialize, Serialize};
use skirmish_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full save row, payload included.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GameSave {
    pub id: DbId,
    pub user_id: DbId,
    pub slot_name: String,
    pub game_data: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing row without the payload.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GameSaveSummary {
    pub id: DbId,
    pub slot_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for writing a save slot.
#[derive(Debug, Deserialize)]
pub struct SaveGameRequest {
    pub slot_name: String,
    pub game_data: serde_json::Value,
}
