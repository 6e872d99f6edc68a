//! Repository for the `game_saves` table. Each user owns at most one save
//! per slot name (`uq_game_saves_user_slot`), so writes go through an upsert.

use sqlx::PgPool;
use skirmish_core::types::DbId;

use crate::models::game_save::{GameSave, GameSaveSummary};

const COLUMNS: &str = "id, user_id, slot_name, game_data, created_at, updated_at";

/// Provides persistence for per-user save slots.
pub struct GameSaveRepo;

impl GameSaveRepo {
    /// Insert or overwrite the save stored under `slot_name` for a user.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        slot_name: &str,
        game_data: &serde_json::Value,
    ) -> Result<GameSave, sqlx::Error> {
        let query = format!(
            "INSERT INTO game_saves (user_id, slot_name, game_data)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id, slot_name)
             DO UPDATE SET game_data = EXCLUDED.game_data, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GameSave>(&query)
            .bind(user_id)
            .bind(slot_name)
            .bind(game_data)
            .fetch_one(pool)
            .await
    }

    /// Fetch a single save slot, including its payload.
    pub async fn find_slot(
        pool: &PgPool,
        user_id: DbId,
        slot_name: &str,
    ) -> Result<Option<GameSave>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM game_saves WHERE user_id = $1 AND slot_name = $2");
        sqlx::query_as::<_, GameSave>(&query)
            .bind(user_id)
            .bind(slot_name)
            .fetch_optional(pool)
            .await
    }

    /// Delete a save slot. Returns `true` if a row was removed.
    pub async fn delete_slot(
        pool: &PgPool,
        user_id: DbId,
        slot_name: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM game_saves WHERE user_id = $1 AND slot_name = $2")
            .bind(user_id)
            .bind(slot_name)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All of a user's save slots, most recently written first. Payloads
    /// are omitted so the listing stays cheap for large saves.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<GameSaveSummary>, sqlx::Error> {
        sqlx::query_as::<_, GameSaveSummary>(
            "SELECT id, slot_name, created_at, updated_at
             FROM game_saves
             WHERE user_id = $1
             ORDER BY updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
