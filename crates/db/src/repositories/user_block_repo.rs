//! Repository for the `user_blocks` table.
//!
//! Blocks are directional rows; "is interaction forbidden" checks both
//! orderings in one OR query. Creating a block removes any friendship for
//! the pair in the same transaction so a concurrent friend-accept cannot
//! race into a "blocked but still friends" state.

use sqlx::PgPool;
use skirmish_core::types::DbId;

use crate::models::user_block::{BlockedUserRow, UserBlock};

const COLUMNS: &str = "id, blocker_id, blocked_user_id, created_at";

/// Provides CRUD operations for user blocks.
pub struct UserBlockRepo;

impl UserBlockRepo {
    /// Whether a block exists between the two users in either direction.
    pub async fn exists_between(pool: &PgPool, a: DbId, b: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM user_blocks
                WHERE (blocker_id = $1 AND blocked_user_id = $2)
                   OR (blocker_id = $2 AND blocked_user_id = $1))",
        )
        .bind(a)
        .bind(b)
        .fetch_one(pool)
        .await
    }

    /// Whether `blocker` has blocked `blocked` (this ordering only).
    pub async fn exists_directed(
        pool: &PgPool,
        blocker: DbId,
        blocked: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM user_blocks
                WHERE blocker_id = $1 AND blocked_user_id = $2)",
        )
        .bind(blocker)
        .bind(blocked)
        .fetch_one(pool)
        .await
    }

    /// Insert a block row, deleting any friendship between the pair (either
    /// direction) in the same transaction.
    pub async fn create(
        pool: &PgPool,
        blocker: DbId,
        blocked: DbId,
    ) -> Result<UserBlock, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM friendships
             WHERE (requester_id = $1 AND addressee_id = $2)
                OR (requester_id = $2 AND addressee_id = $1)",
        )
        .bind(blocker)
        .bind(blocked)
        .execute(&mut *tx)
        .await?;

        let insert_query = format!(
            "INSERT INTO user_blocks (blocker_id, blocked_user_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let block = sqlx::query_as::<_, UserBlock>(&insert_query)
            .bind(blocker)
            .bind(blocked)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(block)
    }

    /// Delete the block row for this ordered pair. Returns `true` if a row
    /// was removed. Unblocking never restores a prior friendship.
    pub async fn delete(pool: &PgPool, blocker: DbId, blocked: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM user_blocks WHERE blocker_id = $1 AND blocked_user_id = $2")
                .bind(blocker)
                .bind(blocked)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All users this actor has blocked, newest first, with display names.
    pub async fn list_for(
        pool: &PgPool,
        blocker: DbId,
    ) -> Result<Vec<BlockedUserRow>, sqlx::Error> {
        sqlx::query_as::<_, BlockedUserRow>(
            "SELECT b.id, b.blocked_user_id, u.display_name, b.created_at
             FROM user_blocks b
             JOIN users u ON u.id = b.blocked_user_id
             WHERE b.blocker_id = $1
             ORDER BY b.created_at DESC",
        )
        .bind(blocker)
        .fetch_all(pool)
        .await
    }
}
