//! Admin-only handlers: user management and analytics.
//!
//! Every handler takes [`RequireAdmin`], so non-admins get 403 before any
//! query runs.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use tratics_core::error::CoreError;
use tratics_core::roles::Role;
use tratics_core::stats::{total_pages, StatsWindows};
use tratics_core::types::DbId;
use tratics_core::validation::{parse_positive_id, trimmed, validate_email};
use tratics_db::models::stats::{DashboardStats, UserStats, ViewStats};
use tratics_db::models::user::{AdminUserView, UpdateUser};
use tratics_db::repositories::{is_unique_violation, StatsRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::{ApiJson, ApiPath, ApiQuery, PageParams};
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// `PATCH /admin/users/{id}` body. Absent fields are left untouched;
/// `username: null` clears the username.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub username: Option<Option<String>>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Distinguish an explicit `null` from an absent key.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// One page of `GET /admin/users`.
#[derive(Debug, Serialize)]
pub struct UserPage {
    pub users: Vec<AdminUserView>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

fn user_not_found() -> AppError {
    AppError::Core(CoreError::NotFound("User not found".into()))
}

fn parse_user_id(raw: &str) -> Result<DbId, CoreError> {
    parse_positive_id(raw, "user id")
}

impl UpdateUserRequest {
    /// Validate and convert to the repository update set.
    fn into_update(self) -> Result<UpdateUser, CoreError> {
        let email = match self.email {
            Some(raw) => {
                let email = trimmed(Some(&raw)).ok_or_else(|| {
                    CoreError::Validation("Email must be a non-empty string".into())
                })?;
                validate_email(&email)?;
                Some(email)
            }
            None => None,
        };

        let update = UpdateUser {
            email,
            username: self.username.map(|u| trimmed(u.as_deref())),
            role: self.role.map(|r| r.parse::<Role>()).transpose()?,
            is_active: self.is_active,
        };

        if update.is_empty() {
            return Err(CoreError::Validation("No valid fields to update".into()));
        }
        Ok(update)
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admin/dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<DashboardStats>>> {
    let windows = StatsWindows::starting_at(Utc::now());
    let stats = StatsRepo::dashboard(&state.pool, &windows).await?;
    Ok(Json(ApiResponse::data(stats)))
}

/// GET /api/admin/users?page=&limit=
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<Json<ApiResponse<UserPage>>> {
    let (page, limit) = params.resolve();
    let (users, total) = tokio::try_join!(
        UserRepo::list_page(&state.pool, limit, params.offset()),
        UserRepo::count(&state.pool),
    )?;

    Ok(Json(ApiResponse::data(UserPage {
        users: users.iter().map(|u| u.to_admin_view()).collect(),
        total,
        page,
        limit,
        total_pages: total_pages(total, limit),
    })))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiPath(raw_id): ApiPath<String>,
) -> AppResult<Json<ApiResponse<AdminUserView>>> {
    let id = parse_user_id(&raw_id)?;
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(user_not_found)?;
    Ok(Json(ApiResponse::data(user.to_admin_view())))
}

/// PATCH /api/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(raw_id): ApiPath<String>,
    ApiJson(input): ApiJson<UpdateUserRequest>,
) -> AppResult<Json<ApiResponse<AdminUserView>>> {
    let id = parse_user_id(&raw_id)?;
    let update = input.into_update()?;

    let user = UserRepo::update(&state.pool, id, &update)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Core(CoreError::Conflict("Email already exists".into()))
            } else {
                AppError::Database(e)
            }
        })?
        .ok_or_else(user_not_found)?;

    tracing::info!(admin_id = admin.id, user_id = id, "User updated by admin");
    Ok(Json(ApiResponse::data(user.to_admin_view())))
}

/// DELETE /api/admin/users/{id}
///
/// Hard delete; sessions and list rows cascade. Admins cannot delete themselves.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(raw_id): ApiPath<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = parse_user_id(&raw_id)?;

    if id == admin.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You cannot delete your own account".into(),
        )));
    }

    if !UserRepo::delete(&state.pool, id).await? {
        return Err(user_not_found());
    }

    tracing::info!(admin_id = admin.id, user_id = id, "User deleted by admin");
    Ok(Json(ApiResponse::message("User deleted")))
}

/// GET /api/admin/stats/views
pub async fn view_stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<ViewStats>>> {
    let windows = StatsWindows::starting_at(Utc::now());
    let stats = StatsRepo::view_stats(&state.pool, &windows).await?;
    Ok(Json(ApiResponse::data(stats)))
}

/// GET /api/admin/stats/users
pub async fn user_stats(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<ApiResponse<UserStats>>> {
    let windows = StatsWindows::starting_at(Utc::now());
    let stats = StatsRepo::user_stats(&state.pool, &windows).await?;
    Ok(Json(ApiResponse::data(stats)))
}
