//! Reporting windows used by the admin analytics queries.

use chrono::{Duration, Months, NaiveTime};

use crate::types::Timestamp;

/// Lower bounds for the "today", "this week" and "this month" counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsWindows {
    /// Midnight UTC of the current day.
    pub today_start: Timestamp,
    /// Seven days before `today_start`.
    pub week_start: Timestamp,
    /// One calendar month before `today_start`.
    pub month_start: Timestamp,
}

impl StatsWindows {
    pub fn starting_at(now: Timestamp) -> Self {
        let today_start = now
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc();
        let week_start = today_start - Duration::days(7);
        let month_start = today_start
            .checked_sub_months(Months::new(1))
            .unwrap_or(today_start - Duration::days(30));

        Self {
            today_start,
            week_start,
            month_start,
        }
    }
}

/// Number of pages needed to show `total` rows at `per_page` rows per page.
pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if per_page <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}
