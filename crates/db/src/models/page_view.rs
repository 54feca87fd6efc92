//! Page view log model (`page_views`). Rows are written once and never updated.

use sqlx::FromRow;
use tratics_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow)]
pub struct PageView {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub page_type: String,
    pub page_slug: Option<String>,
    pub wp_post_id: Option<i64>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub referer: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Default)]
pub struct CreatePageView {
    pub user_id: Option<DbId>,
    pub page_type: String,
    pub page_slug: Option<String>,
    pub wp_post_id: Option<i64>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
    pub referer: Option<String>,
}
