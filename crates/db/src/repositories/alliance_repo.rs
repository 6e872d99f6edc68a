//! Repository for the `alliances` table. Alliance names are unique per
//! instance (`uq_alliances_instance_name` backstops the pre-check).

use sqlx::PgPool;
use skirmish_core::types::DbId;

use crate::models::alliance::{Alliance, AllianceSummary, CreateAlliance, UpdateAlliance};

const COLUMNS: &str = "id, game_instance_id, name, game_data, created_at, updated_at";

/// Provides CRUD operations for alliances.
pub struct AllianceRepo;

impl AllianceRepo {
    /// Insert a new alliance, returning the created row.
    pub async fn create(
        pool: &PgPool,
        instance_id: DbId,
        input: &CreateAlliance,
    ) -> Result<Alliance, sqlx::Error> {
        let query = format!(
            "INSERT INTO alliances (game_instance_id, name, game_data)
             VALUES ($1, $2, COALESCE($3, '{{}}'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alliance>(&query)
            .bind(instance_id)
            .bind(&input.name)
            .bind(&input.game_data)
            .fetch_one(pool)
            .await
    }

    /// Find an alliance scoped to its instance.
    pub async fn find(
        pool: &PgPool,
        instance_id: DbId,
        alliance_id: DbId,
    ) -> Result<Option<Alliance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alliances WHERE game_instance_id = $1 AND id = $2"
        );
        sqlx::query_as::<_, Alliance>(&query)
            .bind(instance_id)
            .bind(alliance_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether another alliance in the instance already uses `name`.
    pub async fn name_taken(
        pool: &PgPool,
        instance_id: DbId,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM alliances
                WHERE game_instance_id = $1 AND name = $2
                  AND ($3::bigint IS NULL OR id <> $3))",
        )
        .bind(instance_id)
        .bind(name)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Update an alliance. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        instance_id: DbId,
        alliance_id: DbId,
        input: &UpdateAlliance,
    ) -> Result<Option<Alliance>, sqlx::Error> {
        let query = format!(
            "UPDATE alliances
             SET name = COALESCE($3, name),
                 game_data = COALESCE($4, game_data),
                 updated_at = NOW()
             WHERE game_instance_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alliance>(&query)
            .bind(instance_id)
            .bind(alliance_id)
            .bind(&input.name)
            .bind(&input.game_data)
            .fetch_optional(pool)
            .await
    }

    /// Delete an alliance. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        instance_id: DbId,
        alliance_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM alliances WHERE game_instance_id = $1 AND id = $2")
                .bind(instance_id)
                .bind(alliance_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All alliances in an instance ordered by name, payloads omitted.
    pub async fn list_for_instance(
        pool: &PgPool,
        instance_id: DbId,
    ) -> Result<Vec<AllianceSummary>, sqlx::Error> {
        sqlx::query_as::<_, AllianceSummary>(
            "SELECT id, game_instance_id, name, created_at, updated_at
             FROM alliances
             WHERE game_instance_id = $1
             ORDER BY name",
        )
        .bind(instance_id)
        .fetch_all(pool)
        .await
    }
}
