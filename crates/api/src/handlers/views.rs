//! Public page-view tracking.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tratics_core::error::CoreError;
use tratics_core::validation::{
    trimmed, validate_max_length, validate_positive_id, MAX_PAGE_TYPE_LENGTH, MAX_SLUG_LENGTH,
};
use tratics_db::models::page_view::CreatePageView;
use tratics_db::repositories::PageViewRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::client::{clip, ClientMeta};
use crate::query::ApiJson;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Longest referer stored.
const MAX_REFERER_LEN: usize = 2048;

/// Request body for `POST /views`.
#[derive(Debug, Deserialize)]
pub struct RecordViewRequest {
    pub page_type: Option<String>,
    pub page_slug: Option<String>,
    pub wp_post_id: Option<i64>,
    pub referer: Option<String>,
}

impl RecordViewRequest {
    fn into_page_view(
        self,
        user_id: Option<i64>,
        meta: ClientMeta,
    ) -> Result<CreatePageView, CoreError> {
        let page_type = trimmed(self.page_type.as_deref())
            .ok_or_else(|| CoreError::Validation("page_type is required".into()))?;
        validate_max_length(&page_type, MAX_PAGE_TYPE_LENGTH, "page_type")?;

        let page_slug = trimmed(self.page_slug.as_deref());
        if let Some(slug) = &page_slug {
            validate_max_length(slug, MAX_SLUG_LENGTH, "page_slug")?;
        }

        let wp_post_id = self
            .wp_post_id
            .map(|id| validate_positive_id(id, "wp_post_id"))
            .transpose()?;

        Ok(CreatePageView {
            user_id,
            page_type,
            page_slug,
            wp_post_id,
            user_agent: meta.user_agent,
            ip_address: meta.ip_address,
            referer: self.referer.and_then(|r| clip(&r, MAX_REFERER_LEN)),
        })
    }
}

/// POST /api/views
///
/// Public. A valid access cookie attributes the view to its user; anonymous
/// views are stored with no user.
pub async fn record_view(
    State(state): State<AppState>,
    meta: ClientMeta,
    user: Option<AuthUser>,
    ApiJson(input): ApiJson<RecordViewRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    let view = input.into_page_view(user.map(|u| u.id), meta)?;

    let id = PageViewRepo::create(&state.pool, &view).await?;
    tracing::debug!(view_id = id, page_type = %view.page_type, "Page view recorded");

    Ok((StatusCode::CREATED, Json(ApiResponse::ok())))
}
