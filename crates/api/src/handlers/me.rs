//! Handlers for `/me`: the caller's profile and watchlist/favorite lists.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tratics_core::error::CoreError;
use tratics_core::lists::{ItemType, ListKey, ListType};
use tratics_core::validation::{
    parse_positive_id, trimmed, validate_max_length, validate_positive_id, MAX_SLUG_LENGTH,
};
use tratics_db::models::list_item::{ListFilter, ListItem};
use tratics_db::models::user::UserProfile;
use tratics_db::repositories::{ListRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{ApiJson, ApiQuery};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Query parameters for `GET /me/lists`.
#[derive(Debug, Deserialize)]
pub struct ListsQuery {
    pub list_type: Option<String>,
    pub item_type: Option<String>,
}

/// Query parameters for `GET /me/lists/check`.
#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    pub list_type: Option<String>,
    pub item_type: Option<String>,
    pub wp_post_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddToListRequest {
    pub list_type: Option<String>,
    pub item_type: Option<String>,
    pub wp_post_id: Option<i64>,
    pub wp_slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveFromListRequest {
    pub list_type: Option<String>,
    pub item_type: Option<String>,
    pub wp_post_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ListStatus {
    #[serde(rename = "isInList")]
    pub is_in_list: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse the membership key; `wp_post_id` of 0 counts as missing.
fn parse_key(list_type: &str, item_type: &str, wp_post_id: i64) -> Result<ListKey, CoreError> {
    Ok(ListKey {
        list_type: list_type.parse()?,
        item_type: item_type.parse()?,
        wp_post_id: validate_positive_id(wp_post_id, "wp_post_id")?,
    })
}

/// GET /api/me
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    let row = UserRepo::find_by_id(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound("User not found".into())))?;
    Ok(Json(ApiResponse::data(row.to_profile())))
}

/// GET /api/me/lists?list_type=&item_type=
///
/// Newest membership first; both filters are optional.
pub async fn get_lists(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<ListsQuery>,
) -> AppResult<Json<ApiResponse<Vec<ListItem>>>> {
    let filter = ListFilter {
        list_type: non_empty(query.list_type)
            .map(|v| v.parse::<ListType>())
            .transpose()?,
        item_type: non_empty(query.item_type)
            .map(|v| v.parse::<ItemType>())
            .transpose()?,
    };

    let items = ListRepo::list(&state.pool, user.id, &filter).await?;
    Ok(Json(ApiResponse::data(items)))
}

/// POST /api/me/lists
///
/// Idempotent: adding an existing membership returns the stored row.
pub async fn add_to_list(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<AddToListRequest>,
) -> AppResult<Json<ApiResponse<ListItem>>> {
    let (Some(list_type), Some(item_type), Some(wp_post_id), Some(wp_slug)) = (
        non_empty(input.list_type),
        non_empty(input.item_type),
        input.wp_post_id.filter(|id| *id != 0),
        trimmed(input.wp_slug.as_deref()),
    ) else {
        return Err(AppError::Core(CoreError::Validation(
            "Missing required fields: list_type, item_type, wp_post_id, wp_slug".into(),
        )));
    };

    let key = parse_key(&list_type, &item_type, wp_post_id)?;
    validate_max_length(&wp_slug, MAX_SLUG_LENGTH, "wp_slug")?;

    let item = ListRepo::add(&state.pool, user.id, &key, &wp_slug)
        .await?
        .ok_or_else(|| AppError::InternalError("List item missing after insert".into()))?;

    tracing::debug!(
        user_id = user.id,
        list_type = %key.list_type,
        item_type = %key.item_type,
        wp_post_id = key.wp_post_id,
        "List item stored"
    );

    Ok(Json(ApiResponse::data(item)))
}

/// DELETE /api/me/lists
pub async fn remove_from_list(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<RemoveFromListRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let (Some(list_type), Some(item_type), Some(wp_post_id)) = (
        non_empty(input.list_type),
        non_empty(input.item_type),
        input.wp_post_id.filter(|id| *id != 0),
    ) else {
        return Err(AppError::Core(CoreError::Validation(
            "Missing required fields: list_type, item_type, wp_post_id".into(),
        )));
    };

    let key = parse_key(&list_type, &item_type, wp_post_id)?;

    if !ListRepo::remove(&state.pool, user.id, &key).await? {
        return Err(AppError::Core(CoreError::NotFound(
            "Item not found in list".into(),
        )));
    }

    Ok(Json(ApiResponse::message("Item removed from list")))
}

/// GET /api/me/lists/check?list_type=&item_type=&wp_post_id=
pub async fn check_list_status(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<CheckQuery>,
) -> AppResult<Json<ApiResponse<ListStatus>>> {
    let (Some(list_type), Some(item_type), Some(wp_post_id)) = (
        non_empty(query.list_type),
        non_empty(query.item_type),
        non_empty(query.wp_post_id),
    ) else {
        return Err(AppError::Core(CoreError::Validation(
            "Missing required query params: list_type, item_type, wp_post_id".into(),
        )));
    };

    let wp_post_id = parse_positive_id(&wp_post_id, "wp_post_id")?;
    let key = parse_key(&list_type, &item_type, wp_post_id)?;

    let is_in_list = ListRepo::exists(&state.pool, user.id, &key).await?;
    Ok(Json(ApiResponse::data(ListStatus { is_in_list })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_validation_reports_the_bad_field() {
        let err = parse_key("wishlist", "movie", 1).unwrap_err();
        assert_eq!(
            err.message(),
            "Invalid list_type. Must be \"watchlist\" or \"favorite\""
        );

        let err = parse_key("favorite", "song", 1).unwrap_err();
        assert_eq!(
            err.message(),
            "Invalid item_type. Must be \"movie\", \"series\", or \"episode\""
        );

        let err = parse_key("favorite", "movie", -4).unwrap_err();
        assert_eq!(err.message(), "Invalid wp_post_id");
    }

    #[test]
    fn list_status_uses_camel_case() {
        let json = serde_json::to_value(ListStatus { is_in_list: true }).unwrap();
        assert_eq!(json, serde_json::json!({ "isInList": true }));
    }
}
