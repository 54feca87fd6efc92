//! Repository for the `users` table.

use sqlx::{MySql, MySqlPool, QueryBuilder};
use tratics_core::types::DbId;

use crate::models::stats::RecentUser;
use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, username, password_hash, role, is_active, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &MySqlPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (email, username, password_hash, role) VALUES (?, ?, ?, ?)",
        )
        .bind(&input.email)
        .bind(&input.username)
        .bind(&input.password_hash)
        .bind(input.role.as_str())
        .execute(pool)
        .await?;

        let id = result.last_insert_id() as DbId;
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email. Matching follows the column collation
    /// (case-insensitive).
    pub async fn find_by_email(pool: &MySqlPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn email_exists(pool: &MySqlPool, email: &str) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as("SELECT id FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    /// One page of users, most recently created first.
    pub async fn list_page(
        pool: &MySqlPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &MySqlPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
    }

    /// The `limit` newest accounts.
    pub async fn recent(pool: &MySqlPool, limit: i64) -> Result<Vec<RecentUser>, sqlx::Error> {
        sqlx::query_as::<_, RecentUser>(
            "SELECT id, email, username, created_at FROM users
             ORDER BY created_at DESC, id DESC
             LIMIT ?",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Apply a partial update. Only fields set in `input` are written.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &MySqlPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        if !input.is_empty() {
            let mut builder: QueryBuilder<MySql> = QueryBuilder::new("UPDATE users SET ");
            let mut fields = builder.separated(", ");
            if let Some(email) = &input.email {
                fields.push("email = ").push_bind_unseparated(email.clone());
            }
            if let Some(username) = &input.username {
                fields.push("username = ").push_bind_unseparated(username.clone());
            }
            if let Some(role) = input.role {
                fields.push("role = ").push_bind_unseparated(role.as_str());
            }
            if let Some(is_active) = input.is_active {
                fields.push("is_active = ").push_bind_unseparated(is_active);
            }
            fields.push("updated_at = CURRENT_TIMESTAMP");
            builder.push(" WHERE id = ").push_bind(id);

            builder.build().execute(pool).await?;
        }

        Self::find_by_id(pool, id).await
    }

    /// Hard-delete a user. Sessions and list rows go with it via
    /// `ON DELETE CASCADE`. Returns `true` if a row was deleted.
    pub async fn delete(pool: &MySqlPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
