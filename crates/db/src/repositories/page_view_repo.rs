//! Repository for the append-only `page_views` log.

use sqlx::MySqlPool;
use tratics_core::types::{DbId, Timestamp};

use crate::models::page_view::{CreatePageView, PageView};
use crate::models::stats::{PageTypeCount, TopPage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, page_type, page_slug, wp_post_id, user_agent, \
                       ip_address, referer, created_at";

pub struct PageViewRepo;

impl PageViewRepo {
    /// Record a view. Returns the new row id.
    pub async fn create(pool: &MySqlPool, input: &CreatePageView) -> Result<DbId, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO page_views
                (user_id, page_type, page_slug, wp_post_id, user_agent, ip_address, referer)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(input.user_id)
        .bind(&input.page_type)
        .bind(&input.page_slug)
        .bind(input.wp_post_id)
        .bind(&input.user_agent)
        .bind(&input.ip_address)
        .bind(&input.referer)
        .execute(pool)
        .await?;
        Ok(result.last_insert_id() as DbId)
    }

    pub async fn find_by_id(pool: &MySqlPool, id: DbId) -> Result<Option<PageView>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM page_views WHERE id = ?");
        sqlx::query_as::<_, PageView>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Views recorded at or after `since`; `None` counts everything.
    pub async fn count_since(
        pool: &MySqlPool,
        since: Option<Timestamp>,
    ) -> Result<i64, sqlx::Error> {
        match since {
            Some(since) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM page_views WHERE created_at >= ?")
                    .bind(since)
                    .fetch_one(pool)
                    .await
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM page_views")
                    .fetch_one(pool)
                    .await
            }
        }
    }

    pub async fn count_by_page_type(pool: &MySqlPool) -> Result<Vec<PageTypeCount>, sqlx::Error> {
        sqlx::query_as::<_, PageTypeCount>(
            "SELECT page_type, COUNT(*) AS count
             FROM page_views
             GROUP BY page_type
             ORDER BY count DESC, page_type",
        )
        .fetch_all(pool)
        .await
    }

    /// Most viewed posts of one page type.
    pub async fn top_posts(
        pool: &MySqlPool,
        page_type: &str,
        limit: i64,
    ) -> Result<Vec<TopPage>, sqlx::Error> {
        sqlx::query_as::<_, TopPage>(
            "SELECT wp_post_id, page_slug, COUNT(*) AS view_count
             FROM page_views
             WHERE page_type = ? AND wp_post_id IS NOT NULL
             GROUP BY wp_post_id, page_slug
             ORDER BY view_count DESC, wp_post_id
             LIMIT ?",
        )
        .bind(page_type)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
