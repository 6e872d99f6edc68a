//! Game instance entity model and DTOs.

use serde::{Deserialize, Serialize};
use skirmish_core::access::InstanceAccessType;
use skirmish_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full game instance row. Serialized as-is in API responses; the instance
/// carries no payload fields of its own.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GameInstance {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub access_type: InstanceAccessType,
    pub capacity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a game instance.
#[derive(Debug, Deserialize)]
pub struct CreateGameInstance {
    pub name: String,
    pub access_type: InstanceAccessType,
    pub capacity: i32,
}

/// DTO for updating a game instance. All fields are required: the update
/// endpoint replaces the mutable fields wholesale.
#[derive(Debug, Deserialize)]
pub struct UpdateGameInstance {
    pub name: String,
    pub access_type: InstanceAccessType,
    pub capacity: i32,
}
