//! List membership model (`user_lists`).

use serde::Serialize;
use sqlx::FromRow;
use tratics_core::lists::{ItemType, ListType};
use tratics_core::types::{DbId, Timestamp};

/// A row linking a user to a WordPress post under a list type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListItem {
    pub id: DbId,
    pub user_id: DbId,
    pub list_type: String,
    pub item_type: String,
    pub wp_post_id: i64,
    pub wp_slug: String,
    pub created_at: Timestamp,
}

/// Optional filters for listing a user's memberships.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilter {
    pub list_type: Option<ListType>,
    pub item_type: Option<ItemType>,
}
