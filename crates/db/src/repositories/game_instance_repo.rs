//! Repository for the `game_instances` table.

use sqlx::PgPool;
use skirmish_core::types::DbId;

use crate::models::game_instance::{CreateGameInstance, GameInstance, UpdateGameInstance};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, access_type, capacity, created_at, updated_at";

/// Provides CRUD and discovery operations for game instances.
pub struct GameInstanceRepo;

impl GameInstanceRepo {
    /// Insert a new instance owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateGameInstance,
    ) -> Result<GameInstance, sqlx::Error> {
        let query = format!(
            "INSERT INTO game_instances (owner_id, name, access_type, capacity)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GameInstance>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(input.access_type)
            .bind(input.capacity)
            .fetch_one(pool)
            .await
    }

    /// Find an instance by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<GameInstance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM game_instances WHERE id = $1");
        sqlx::query_as::<_, GameInstance>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the mutable fields of an instance, bumping `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGameInstance,
    ) -> Result<Option<GameInstance>, sqlx::Error> {
        let query = format!(
            "UPDATE game_instances
             SET name = $2, access_type = $3, capacity = $4, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, GameInstance>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.access_type)
            .bind(input.capacity)
            .fetch_optional(pool)
            .await
    }

    /// Delete an instance (cascades to its world/player data, alliances,
    /// and listings). Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM game_instances WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Instances the user owns or is a member of, most recently updated
    /// first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<GameInstance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM game_instances g
             WHERE g.owner_id = $1
                OR EXISTS (
                    SELECT 1 FROM player_game_data p
                    WHERE p.game_instance_id = g.id AND p.user_id = $1)
             ORDER BY g.updated_at DESC"
        );
        sqlx::query_as::<_, GameInstance>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Discovery listing: instances the user does NOT already belong to and
    /// could join.
    ///
    /// Mirrors the access policy for non-members in a single query so the
    /// block and friendship checks cannot be read-skewed between round
    /// trips: excludes owned/joined instances and owners with a block
    /// relationship in either direction; includes public instances and
    /// friends-and-invite-only instances whose owner is an accepted friend.
    /// Invite-only instances are never browsable.
    pub async fn browse(pool: &PgPool, user_id: DbId) -> Result<Vec<GameInstance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM game_instances g
             WHERE g.owner_id <> $1
               AND NOT EXISTS (
                    SELECT 1 FROM player_game_data p
                    WHERE p.game_instance_id = g.id AND p.user_id = $1)
               AND NOT EXISTS (
                    SELECT 1 FROM user_blocks b
                    WHERE (b.blocker_id = $1 AND b.blocked_user_id = g.owner_id)
                       OR (b.blocker_id = g.owner_id AND b.blocked_user_id = $1))
               AND (g.access_type = 'public'
                    OR (g.access_type = 'friends_and_invite_only'
                        AND EXISTS (
                            SELECT 1 FROM friendships f
                            WHERE f.status = 'accepted'
                              AND ((f.requester_id = $1 AND f.addressee_id = g.owner_id)
                                OR (f.requester_id = g.owner_id AND f.addressee_id = $1)))))
             ORDER BY g.updated_at DESC"
        );
        sqlx::query_as::<_, GameInstance>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
