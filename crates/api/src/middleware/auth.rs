//! Cookie-based authentication extractor for axum handlers.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use tratics_core::error::CoreError;
use tratics_core::roles::Role;
use tratics_core::types::DbId;
use tratics_db::repositories::UserRepo;

use crate::auth::cookies::ACCESS_TOKEN_COOKIE;
use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::AppState;

/// The caller, as currently stored in `users`.
///
/// The access token only proves identity; email, username and role come from
/// the user row loaded on every request, so role changes and deletions apply
/// immediately.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub id: DbId,
    pub email: String,
    pub username: Option<String>,
    pub role: Role,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.into()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(ACCESS_TOKEN_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| unauthorized("Unauthorized"))?;

        let claims = verify_access_token(&token, &state.config.jwt)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        let user = UserRepo::find_by_id(&state.pool, claims.user_id)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| {
                tracing::debug!(user_id = claims.user_id, "Token for missing or inactive user");
                unauthorized("Unauthorized")
            })?;

        Ok(AuthUser {
            id: user.id,
            role: user.role(),
            email: user.email,
            username: user.username,
        })
    }
}

/// `Option<AuthUser>` resolves to `None` for anonymous or invalid callers
/// instead of rejecting the request.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        match <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state).await {
            Ok(user) => Ok(Some(user)),
            Err(AppError::Core(CoreError::Unauthorized(_))) => Ok(None),
            Err(e) => {
                tracing::warn!(error = %e, "Treating caller as anonymous after auth lookup failure");
                Ok(None)
            }
        }
    }
}
