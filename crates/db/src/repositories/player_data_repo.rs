//! Repository for the `player_game_data` table.
//!
//! Row existence for (instance, user) is what the access policy calls
//! membership.

use sqlx::PgPool;
use skirmish_core::types::DbId;

use crate::models::player_data::{PlayerGameData, PlayerGameDataSummary};

const COLUMNS: &str = "id, game_instance_id, user_id, game_data, created_at, updated_at";

/// Provides CRUD operations for per-player game data.
pub struct PlayerGameDataRepo;

impl PlayerGameDataRepo {
    /// Whether the user has a player-data row (is a member) for the instance.
    pub async fn exists(
        pool: &PgPool,
        instance_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM player_game_data
                WHERE game_instance_id = $1 AND user_id = $2)",
        )
        .bind(instance_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Number of member rows for the instance.
    pub async fn member_count(pool: &PgPool, instance_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM player_game_data WHERE game_instance_id = $1",
        )
        .bind(instance_id)
        .fetch_one(pool)
        .await
    }

    /// Find the user's row for the instance.
    pub async fn find(
        pool: &PgPool,
        instance_id: DbId,
        user_id: DbId,
    ) -> Result<Option<PlayerGameData>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM player_game_data
             WHERE game_instance_id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, PlayerGameData>(&query)
            .bind(instance_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the user's payload for the instance. One statement
    /// keyed on the (instance, user) unique index, so concurrent saves
    /// cannot produce duplicate membership rows.
    pub async fn upsert(
        pool: &PgPool,
        instance_id: DbId,
        user_id: DbId,
        game_data: &serde_json::Value,
    ) -> Result<PlayerGameData, sqlx::Error> {
        let query = format!(
            "INSERT INTO player_game_data (game_instance_id, user_id, game_data)
             VALUES ($1, $2, $3)
             ON CONFLICT (game_instance_id, user_id)
             DO UPDATE SET game_data = EXCLUDED.game_data, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlayerGameData>(&query)
            .bind(instance_id)
            .bind(user_id)
            .bind(game_data)
            .fetch_one(pool)
            .await
    }

    /// Delete the user's row for the instance. Returns `true` if removed.
    pub async fn delete(
        pool: &PgPool,
        instance_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM player_game_data WHERE game_instance_id = $1 AND user_id = $2",
        )
        .bind(instance_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All member rows for an instance, payloads omitted, most recently
    /// updated first. Owner-only at the handler layer.
    pub async fn list_for_instance(
        pool: &PgPool,
        instance_id: DbId,
    ) -> Result<Vec<PlayerGameDataSummary>, sqlx::Error> {
        sqlx::query_as::<_, PlayerGameDataSummary>(
            "SELECT id, game_instance_id, user_id, created_at, updated_at
             FROM player_game_data
             WHERE game_instance_id = $1
             ORDER BY updated_at DESC",
        )
        .bind(instance_id)
        .fetch_all(pool)
        .await
    }
}
