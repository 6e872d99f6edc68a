//! Repository for the `world_view_game_data` table (zero-or-one row per
//! instance).

use sqlx::PgPool;
use skirmish_core::types::DbId;

use crate::models::world_view::WorldViewGameData;

const COLUMNS: &str = "id, game_instance_id, game_data, created_at, updated_at";

/// Provides read/write operations for shared world state.
pub struct WorldViewRepo;

impl WorldViewRepo {
    /// Find the instance's world-view row, if one has been written.
    pub async fn find(
        pool: &PgPool,
        instance_id: DbId,
    ) -> Result<Option<WorldViewGameData>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM world_view_game_data WHERE game_instance_id = $1"
        );
        sqlx::query_as::<_, WorldViewGameData>(&query)
            .bind(instance_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the instance's world-view payload.
    pub async fn upsert(
        pool: &PgPool,
        instance_id: DbId,
        game_data: &serde_json::Value,
    ) -> Result<WorldViewGameData, sqlx::Error> {
        let query = format!(
            "INSERT INTO world_view_game_data (game_instance_id, game_data)
             VALUES ($1, $2)
             ON CONFLICT (game_instance_id)
             DO UPDATE SET game_data = EXCLUDED.game_data, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WorldViewGameData>(&query)
            .bind(instance_id)
            .bind(game_data)
            .fetch_one(pool)
            .await
    }
}
