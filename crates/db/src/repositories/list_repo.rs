//! Repository for the `user_lists` table (watchlists and favorites).

use sqlx::{MySql, MySqlPool, QueryBuilder};
use tratics_core::lists::ListKey;
use tratics_core::types::DbId;

use super::is_unique_violation;
use crate::models::list_item::{ListFilter, ListItem};
use crate::models::stats::ListBucket;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, list_type, item_type, wp_post_id, wp_slug, created_at";

/// Provides membership operations for user lists.
pub struct ListRepo;

impl ListRepo {
    /// Add a membership and return the canonical row.
    ///
    /// A duplicate `(user_id, list_type, item_type, wp_post_id)` is not an
    /// error: the existing row is returned unchanged. Returns `None` only if the
    /// row vanished between the insert and the re-fetch.
    pub async fn add(
        pool: &MySqlPool,
        user_id: DbId,
        key: &ListKey,
        wp_slug: &str,
    ) -> Result<Option<ListItem>, sqlx::Error> {
        let inserted = sqlx::query(
            "INSERT INTO user_lists (user_id, list_type, item_type, wp_post_id, wp_slug)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(key.list_type.as_str())
        .bind(key.item_type.as_str())
        .bind(key.wp_post_id)
        .bind(wp_slug)
        .execute(pool)
        .await;

        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!(user_id, wp_post_id = key.wp_post_id, "List item already present");
            }
            Err(e) => return Err(e),
        }

        Self::find(pool, user_id, key).await
    }

    pub async fn find(
        pool: &MySqlPool,
        user_id: DbId,
        key: &ListKey,
    ) -> Result<Option<ListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_lists
             WHERE user_id = ? AND list_type = ? AND item_type = ? AND wp_post_id = ?"
        );
        sqlx::query_as::<_, ListItem>(&query)
            .bind(user_id)
            .bind(key.list_type.as_str())
            .bind(key.item_type.as_str())
            .bind(key.wp_post_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &MySqlPool, user_id: DbId, key: &ListKey) -> Result<bool, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM user_lists
             WHERE user_id = ? AND list_type = ? AND item_type = ? AND wp_post_id = ?",
        )
        .bind(user_id)
        .bind(key.list_type.as_str())
        .bind(key.item_type.as_str())
        .bind(key.wp_post_id)
        .fetch_optional(pool)
        .await?;
        Ok(row.is_some())
    }

    /// A user's memberships, newest first, optionally narrowed by list and item type.
    pub async fn list(
        pool: &MySqlPool,
        user_id: DbId,
        filter: &ListFilter,
    ) -> Result<Vec<ListItem>, sqlx::Error> {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(format!(
            "SELECT {COLUMNS} FROM user_lists WHERE user_id = "
        ));
        builder.push_bind(user_id);
        if let Some(list_type) = filter.list_type {
            builder.push(" AND list_type = ").push_bind(list_type.as_str());
        }
        if let Some(item_type) = filter.item_type {
            builder.push(" AND item_type = ").push_bind(item_type.as_str());
        }
        builder.push(" ORDER BY created_at DESC, id DESC");

        builder.build_query_as::<ListItem>().fetch_all(pool).await
    }

    /// Remove a membership. Returns `true` if a row was deleted.
    pub async fn remove(pool: &MySqlPool, user_id: DbId, key: &ListKey) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_lists
             WHERE user_id = ? AND list_type = ? AND item_type = ? AND wp_post_id = ?",
        )
        .bind(user_id)
        .bind(key.list_type.as_str())
        .bind(key.item_type.as_str())
        .bind(key.wp_post_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Row counts grouped by `(list_type, item_type)` across all users.
    pub async fn count_by_type(pool: &MySqlPool) -> Result<Vec<ListBucket>, sqlx::Error> {
        sqlx::query_as::<_, ListBucket>(
            "SELECT list_type, item_type, COUNT(*) AS count
             FROM user_lists
             GROUP BY list_type, item_type
             ORDER BY list_type, item_type",
        )
        .fetch_all(pool)
        .await
    }

    /// Number of distinct users with at least one membership.
    pub async fn count_users_with_items(pool: &MySqlPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(DISTINCT user_id) FROM user_lists")
            .fetch_one(pool)
            .await
    }
}
