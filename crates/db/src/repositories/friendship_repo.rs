//! Repository for the `friendships` table.
//!
//! Pair lookups always check both orderings in a single OR query so the
//! unordered-pair invariant cannot be read-skewed by a concurrent write.
//! The `uq_friendships_pair` expression index is the final backstop: a
//! unique violation on insert means another request won the race.

use sqlx::PgPool;
use skirmish_core::social::FriendshipStatus;
use skirmish_core::types::DbId;

use crate::models::friendship::{FriendRequestRow, FriendRow, Friendship};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, requester_id, addressee_id, status, created_at, updated_at";

/// Column list for request rows with both display names joined in.
const DETAILED_COLUMNS: &str = "f.id, f.requester_id, \
     ru.display_name AS requester_display_name, \
     f.addressee_id, \
     au.display_name AS addressee_display_name, \
     f.status, f.created_at, f.updated_at";

const DETAILED_JOINS: &str = "FROM friendships f \
     JOIN users ru ON ru.id = f.requester_id \
     JOIN users au ON au.id = f.addressee_id";

/// Provides CRUD operations for friendship records.
pub struct FriendshipRepo;

impl FriendshipRepo {
    /// Find a friendship by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Friendship>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM friendships WHERE id = $1");
        sqlx::query_as::<_, Friendship>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the single record for the unordered pair `{a, b}`, if any.
    pub async fn find_between(
        pool: &PgPool,
        a: DbId,
        b: DbId,
    ) -> Result<Option<Friendship>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM friendships
             WHERE (requester_id = $1 AND addressee_id = $2)
                OR (requester_id = $2 AND addressee_id = $1)"
        );
        sqlx::query_as::<_, Friendship>(&query)
            .bind(a)
            .bind(b)
            .fetch_optional(pool)
            .await
    }

    /// Whether an accepted friendship exists for the unordered pair.
    pub async fn accepted_exists_between(
        pool: &PgPool,
        a: DbId,
        b: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM friendships
                WHERE status = 'accepted'
                  AND ((requester_id = $1 AND addressee_id = $2)
                    OR (requester_id = $2 AND addressee_id = $1)))",
        )
        .bind(a)
        .bind(b)
        .fetch_one(pool)
        .await
    }

    /// Insert a fresh pending request from `requester` to `addressee`.
    ///
    /// Any declined record for the pair is removed in the same transaction
    /// (re-requesting after a decline is allowed). A unique violation on
    /// `uq_friendships_pair` means a pending or accepted record was created
    /// concurrently; the caller translates it into a conflict.
    pub async fn create_pending(
        pool: &PgPool,
        requester: DbId,
        addressee: DbId,
    ) -> Result<Friendship, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM friendships
             WHERE status = 'declined'
               AND ((requester_id = $1 AND addressee_id = $2)
                 OR (requester_id = $2 AND addressee_id = $1))",
        )
        .bind(requester)
        .bind(addressee)
        .execute(&mut *tx)
        .await?;

        let insert_query = format!(
            "INSERT INTO friendships (requester_id, addressee_id, status)
             VALUES ($1, $2, 'pending')
             RETURNING {COLUMNS}"
        );
        let friendship = sqlx::query_as::<_, Friendship>(&insert_query)
            .bind(requester)
            .bind(addressee)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(friendship)
    }

    /// Set the status of a friendship, bumping `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: FriendshipStatus,
    ) -> Result<Option<Friendship>, sqlx::Error> {
        let query = format!(
            "UPDATE friendships SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Friendship>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a friendship by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM friendships WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete the accepted record for the unordered pair, if any.
    /// Returns `true` if a row was removed.
    pub async fn delete_accepted_between(
        pool: &PgPool,
        a: DbId,
        b: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM friendships
             WHERE status = 'accepted'
               AND ((requester_id = $1 AND addressee_id = $2)
                 OR (requester_id = $2 AND addressee_id = $1))",
        )
        .bind(a)
        .bind(b)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Pending requests addressed to the user, newest first.
    pub async fn list_pending_incoming(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FriendRequestRow>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAILED_COLUMNS} {DETAILED_JOINS}
             WHERE f.addressee_id = $1 AND f.status = 'pending'
             ORDER BY f.created_at DESC"
        );
        sqlx::query_as::<_, FriendRequestRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Pending requests sent by the user, newest first.
    pub async fn list_pending_outgoing(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<FriendRequestRow>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAILED_COLUMNS} {DETAILED_JOINS}
             WHERE f.requester_id = $1 AND f.status = 'pending'
             ORDER BY f.created_at DESC"
        );
        sqlx::query_as::<_, FriendRequestRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All accepted friendships involving the user, resolved to the other
    /// party's id and display name.
    pub async fn list_friends(pool: &PgPool, user_id: DbId) -> Result<Vec<FriendRow>, sqlx::Error> {
        sqlx::query_as::<_, FriendRow>(
            "SELECT f.id AS friendship_id,
                    CASE WHEN f.requester_id = $1 THEN f.addressee_id ELSE f.requester_id END
                        AS user_id,
                    u.display_name,
                    f.updated_at AS since
             FROM friendships f
             JOIN users u
               ON u.id = CASE WHEN f.requester_id = $1 THEN f.addressee_id ELSE f.requester_id END
             WHERE f.status = 'accepted'
               AND (f.requester_id = $1 OR f.addressee_id = $1)
             ORDER BY f.updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
