//! Read-only aggregates for the admin dashboard.

use sqlx::MySqlPool;
use tratics_core::stats::StatsWindows;
use tratics_core::types::Timestamp;

use super::{ListRepo, PageViewRepo, UserRepo};
use crate::models::stats::{DashboardStats, ListStats, UserStats, ViewStats};

/// How many entries the top-N and recent lists carry.
pub const TOP_N: i64 = 10;

pub struct StatsRepo;

impl StatsRepo {
    pub async fn user_stats(
        pool: &MySqlPool,
        windows: &StatsWindows,
    ) -> Result<UserStats, sqlx::Error> {
        Ok(UserStats {
            total_users: UserRepo::count(pool).await?,
            users_today: Self::users_created_since(pool, windows.today_start).await?,
            users_this_week: Self::users_created_since(pool, windows.week_start).await?,
            users_this_month: Self::users_created_since(pool, windows.month_start).await?,
            users_with_lists: ListRepo::count_users_with_items(pool).await?,
        })
    }

    pub async fn view_stats(
        pool: &MySqlPool,
        windows: &StatsWindows,
    ) -> Result<ViewStats, sqlx::Error> {
        Ok(ViewStats {
            total_views: PageViewRepo::count_since(pool, None).await?,
            views_today: PageViewRepo::count_since(pool, Some(windows.today_start)).await?,
            views_this_week: PageViewRepo::count_since(pool, Some(windows.week_start)).await?,
            views_this_month: PageViewRepo::count_since(pool, Some(windows.month_start)).await?,
            views_by_type: PageViewRepo::count_by_page_type(pool).await?,
            top_movies: PageViewRepo::top_posts(pool, "movie", TOP_N).await?,
            top_series: PageViewRepo::top_posts(pool, "series", TOP_N).await?,
        })
    }

    pub async fn list_stats(pool: &MySqlPool) -> Result<ListStats, sqlx::Error> {
        let buckets = ListRepo::count_by_type(pool).await?;
        Ok(ListStats::from_buckets(&buckets))
    }

    /// Everything the dashboard shows, computed against the same windows.
    pub async fn dashboard(
        pool: &MySqlPool,
        windows: &StatsWindows,
    ) -> Result<DashboardStats, sqlx::Error> {
        let (users, views, lists, recent_users) = tokio::try_join!(
            Self::user_stats(pool, windows),
            Self::view_stats(pool, windows),
            Self::list_stats(pool),
            UserRepo::recent(pool, TOP_N),
        )?;

        Ok(DashboardStats {
            users,
            views,
            lists,
            recent_users,
        })
    }

    async fn users_created_since(pool: &MySqlPool, since: Timestamp) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE created_at >= ?")
            .bind(since)
            .fetch_one(pool)
            .await
    }
}
