//! Repository for the `user_sessions` table.

use sqlx::MySqlPool;
use tratics_core::types::DbId;

use crate::models::session::{CreateSession, UserSession};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, refresh_token_hash, user_agent, ip_address, \
                       expires_at, revoked_at, created_at";

/// Provides create, lookup and revocation for user sessions.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert a new session, returning the created row.
    pub async fn create(
        pool: &MySqlPool,
        input: &CreateSession,
    ) -> Result<UserSession, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_sessions
                (user_id, refresh_token_hash, user_agent, ip_address, expires_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(input.user_id)
        .bind(&input.refresh_token_hash)
        .bind(&input.user_agent)
        .bind(&input.ip_address)
        .bind(input.expires_at)
        .execute(pool)
        .await?;

        let id = result.last_insert_id() as DbId;
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_sessions WHERE id = ?");
        sqlx::query_as::<_, UserSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active session by its refresh token hash.
    ///
    /// Only returns sessions that are not revoked and not expired.
    pub async fn find_active_by_refresh_token_hash(
        pool: &MySqlPool,
        hash: &str,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE refresh_token_hash = ?
               AND revoked_at IS NULL
               AND expires_at > UTC_TIMESTAMP()"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(hash)
            .fetch_optional(pool)
            .await
    }

    /// All sessions for a user, newest first.
    pub async fn list_for_user(
        pool: &MySqlPool,
        user_id: DbId,
    ) -> Result<Vec<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions WHERE user_id = ? ORDER BY id DESC"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Revoke a single session. Returns `true` if the row was updated.
    pub async fn revoke(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET revoked_at = UTC_TIMESTAMP()
             WHERE id = ? AND revoked_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Revoke all unrevoked sessions for a user. Returns the count of revoked sessions.
    pub async fn revoke_all_for_user(pool: &MySqlPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET revoked_at = UTC_TIMESTAMP()
             WHERE user_id = ? AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
