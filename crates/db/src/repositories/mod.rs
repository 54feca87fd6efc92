//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&MySqlPool` as the first argument.

pub mod list_repo;
pub mod page_view_repo;
pub mod session_repo;
pub mod stats_repo;
pub mod user_repo;

pub use list_repo::ListRepo;
pub use page_view_repo::PageViewRepo;
pub use session_repo::SessionRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;

/// Whether a sqlx error is a duplicate-key violation (`ER_DUP_ENTRY`).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
