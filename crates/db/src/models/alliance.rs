//! Alliance entity model and DTOs.

use serde::{Deserialize, Serialize};
use skirmish_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full alliance row, payload included. Name is unique per instance.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Alliance {
    pub id: DbId,
    pub game_instance_id: DbId,
    pub name: String,
    pub game_data: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing row without the payload.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AllianceSummary {
    pub id: DbId,
    pub game_instance_id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an alliance.
#[derive(Debug, Deserialize)]
pub struct CreateAlliance {
    pub name: String,
    pub game_data: Option<serde_json::Value>,
}

/// DTO for updating an alliance. Omitted fields are unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateAlliance {
    pub name: Option<String>,
    pub game_data: Option<serde_json::Value>,
}
