//! Aggregate shapes for the admin dashboard.

use serde::Serialize;
use sqlx::FromRow;
use tratics_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, Serialize)]
pub struct UserStats {
    pub total_users: i64,
    pub users_today: i64,
    pub users_this_week: i64,
    pub users_this_month: i64,
    pub users_with_lists: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PageTypeCount {
    pub page_type: String,
    pub count: i64,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopPage {
    pub wp_post_id: i64,
    pub page_slug: Option<String>,
    pub view_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewStats {
    pub total_views: i64,
    pub views_today: i64,
    pub views_this_week: i64,
    pub views_this_month: i64,
    pub views_by_type: Vec<PageTypeCount>,
    pub top_movies: Vec<TopPage>,
    pub top_series: Vec<TopPage>,
}

/// One `(list_type, item_type)` bucket from `user_lists`.
#[derive(Debug, Clone, FromRow)]
pub struct ListBucket {
    pub list_type: String,
    pub item_type: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemTypeCount {
    pub item_type: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListStats {
    pub total_watchlist_items: i64,
    pub total_favorite_items: i64,
    pub watchlist_by_type: Vec<ItemTypeCount>,
    pub favorites_by_type: Vec<ItemTypeCount>,
}

impl ListStats {
    /// Split grouped buckets into per-list totals and breakdowns.
    pub fn from_buckets(buckets: &[ListBucket]) -> Self {
        let by_list = |list_type: &str| -> Vec<ItemTypeCount> {
            buckets
                .iter()
                .filter(|b| b.list_type == list_type)
                .map(|b| ItemTypeCount {
                    item_type: b.item_type.clone(),
                    count: b.count,
                })
                .collect()
        };
        let watchlist_by_type = by_list("watchlist");
        let favorites_by_type = by_list("favorite");

        Self {
            total_watchlist_items: watchlist_by_type.iter().map(|c| c.count).sum(),
            total_favorite_items: favorites_by_type.iter().map(|c| c.count).sum(),
            watchlist_by_type,
            favorites_by_type,
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentUser {
    pub id: DbId,
    pub email: String,
    pub username: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub users: UserStats,
    pub views: ViewStats,
    pub lists: ListStats,
    pub recent_users: Vec<RecentUser>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(list_type: &str, item_type: &str, count: i64) -> ListBucket {
        ListBucket {
            list_type: list_type.into(),
            item_type: item_type.into(),
            count,
        }
    }

    #[test]
    fn buckets_split_by_list_type() {
        let stats = ListStats::from_buckets(&[
            bucket("watchlist", "movie", 3),
            bucket("watchlist", "series", 2),
            bucket("favorite", "episode", 4),
        ]);

        assert_eq!(stats.total_watchlist_items, 5);
        assert_eq!(stats.total_favorite_items, 4);
        assert_eq!(stats.watchlist_by_type.len(), 2);
        assert_eq!(stats.favorites_by_type[0].item_type, "episode");
    }

    #[test]
    fn no_buckets_means_zero_totals() {
        let stats = ListStats::from_buckets(&[]);
        assert_eq!(stats.total_watchlist_items, 0);
        assert!(stats.favorites_by_type.is_empty());
    }
}
