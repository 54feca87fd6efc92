//! Shared query parameter and body extractors for API handlers.
//!
//! The `Api*` wrappers behave like their axum counterparts but reject with
//! [`AppError`] so malformed input still gets the JSON envelope.

use axum::extract::{FromRequest, FromRequestParts};
use serde::Deserialize;

use crate::error::AppError;

/// Default page size for paginated admin listings.
pub const DEFAULT_PAGE_LIMIT: i64 = 50;
/// Largest accepted page size.
pub const MAX_PAGE_LIMIT: i64 = 100;
/// Largest page number whose offset still fits in an `i64` at any limit.
pub const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_LIMIT;

/// `axum::Json` with an [`AppError`] rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Path` with an [`AppError`] rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// `axum::extract::Query` with an [`AppError`] rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Page-number pagination (`?page=&limit=`).
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    /// Page defaults to 1 and is capped at [`MAX_PAGE`]; limit defaults to 50
    /// and is clamped to `1..=100`.
    pub fn resolve(&self) -> (i64, i64) {
        let page = self.page.filter(|p| *p > 0).unwrap_or(1).min(MAX_PAGE);
        let limit = self
            .limit
            .map(|l| l.clamp(1, MAX_PAGE_LIMIT))
            .unwrap_or(DEFAULT_PAGE_LIMIT);
        (page, limit)
    }

    pub fn offset(&self) -> i64 {
        let (page, limit) = self.resolve();
        (page - 1).saturating_mul(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_params_are_missing() {
        assert_eq!(PageParams::default().resolve(), (1, DEFAULT_PAGE_LIMIT));
    }

    #[test]
    fn limit_is_clamped() {
        let params = PageParams {
            page: Some(3),
            limit: Some(1_000),
        };
        assert_eq!(params.resolve(), (3, MAX_PAGE_LIMIT));
        assert_eq!(params.offset(), 200);

        let params = PageParams {
            page: Some(0),
            limit: Some(0),
        };
        assert_eq!(params.resolve(), (1, 1));
    }

    #[test]
    fn huge_page_is_capped_without_overflow() {
        let params = PageParams {
            page: Some(i64::MAX),
            limit: Some(MAX_PAGE_LIMIT),
        };
        assert_eq!(params.resolve(), (MAX_PAGE, MAX_PAGE_LIMIT));
        assert_eq!(params.offset(), (MAX_PAGE - 1) * MAX_PAGE_LIMIT);
    }
}
