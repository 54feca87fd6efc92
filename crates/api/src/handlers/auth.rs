//! Handlers for the `/auth` resource (register, login, logout, refresh, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tratics_core::error::CoreError;
use tratics_core::roles::Role;
use tratics_core::validation::{
    trimmed, validate_email, validate_password_length, MIN_PASSWORD_LENGTH,
};
use tratics_db::models::session::CreateSession;
use tratics_db::models::user::{CreateUser, PublicUser, User};
use tratics_db::repositories::{is_unique_violation, SessionRepo, UserRepo};

use crate::auth::cookies::{clear_auth_cookies, set_auth_cookies, REFRESH_TOKEN_COOKIE};
use crate::auth::jwt::{
    hash_refresh_token, issue_access_token, issue_refresh_token, verify_refresh_token,
};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::client::ClientMeta;
use crate::query::ApiJson;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`. Fields are optional so missing
/// ones produce the domain message rather than a deserialization error.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// `{ "user": { id, email, username, role } }`
#[derive(Debug, Serialize)]
pub struct UserPayload<T: Serialize> {
    pub user: T,
}

type UserResponse<T> = Json<ApiResponse<UserPayload<T>>>;

fn user_response<T: Serialize>(user: T) -> UserResponse<T> {
    Json(ApiResponse::data(UserPayload { user }))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized("Invalid credentials".into()))
}

fn invalid_refresh() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid or expired refresh token".into(),
    ))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create a `user`-role account. Does not log the caller in.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RegisterRequest>,
) -> AppResult<(StatusCode, UserResponse<PublicUser>)> {
    let email = trimmed(input.email.as_deref());
    let username = trimmed(input.username.as_deref());
    let password = input.password.filter(|p| !p.is_empty());

    let (Some(email), Some(username), Some(password)) = (email, username, password) else {
        return Err(AppError::Core(CoreError::Validation(
            "Email, username, and password are required".into(),
        )));
    };

    validate_email(&email)?;
    validate_password_length(&password, MIN_PASSWORD_LENGTH)?;

    if UserRepo::email_exists(&state.pool, &email).await? {
        return Err(AppError::Core(CoreError::Conflict("Email already exists".into())));
    }

    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let input = CreateUser {
        email,
        username: Some(username),
        password_hash,
        role: Role::User,
    };
    let user = UserRepo::create(&state.pool, &input).await.map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Core(CoreError::Conflict("Email already exists".into()))
        } else {
            AppError::Database(e)
        }
    })?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, user_response(user.to_public())))
}

/// POST /api/auth/login
///
/// Verify credentials, open a session and set both auth cookies.
pub async fn login(
    State(state): State<AppState>,
    meta: ClientMeta,
    jar: CookieJar,
    ApiJson(input): ApiJson<LoginRequest>,
) -> AppResult<(CookieJar, UserResponse<PublicUser>)> {
    let email = trimmed(input.email.as_deref());
    let password = input.password.filter(|p| !p.is_empty());
    let (Some(email), Some(password)) = (email, password) else {
        return Err(AppError::Core(CoreError::Validation(
            "Email and password are required".into(),
        )));
    };

    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| {
            tracing::debug!("Login attempt for unknown email");
            invalid_credentials()
        })?;

    let stored_hash = user.password_hash.clone();
    let password_valid = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Password verification task failed: {e}")))?
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        tracing::debug!(user_id = user.id, "Login attempt with wrong password");
        return Err(invalid_credentials());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let jar = open_session(&state, &user, &meta, jar).await?;
    tracing::info!(user_id = user.id, "User logged in");

    Ok((jar, user_response(user.to_public())))
}

/// POST /api/auth/logout
///
/// Always succeeds. A verifiable refresh cookie revokes every session of its
/// user; anything else is ignored. Both cookies are cleared.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<()>>) {
    if let Some(token) = jar.get(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_string()) {
        match verify_refresh_token(&token, &state.config.jwt) {
            Ok(claims) => match SessionRepo::revoke_all_for_user(&state.pool, claims.user_id).await {
                Ok(revoked) => {
                    tracing::info!(user_id = claims.user_id, revoked, "User logged out");
                }
                Err(e) => {
                    tracing::error!(user_id = claims.user_id, error = %e, "Failed to revoke sessions on logout");
                }
            },
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring unverifiable refresh token on logout");
            }
        }
    }

    (
        clear_auth_cookies(jar),
        Json(ApiResponse::message("Logged out successfully")),
    )
}

/// POST /api/auth/refresh
///
/// Exchange a live refresh cookie for a new token pair. The old session is
/// revoked (rotation).
pub async fn refresh(
    State(state): State<AppState>,
    meta: ClientMeta,
    jar: CookieJar,
) -> AppResult<(CookieJar, UserResponse<PublicUser>)> {
    let token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .ok_or_else(invalid_refresh)?;

    let claims =
        verify_refresh_token(&token, &state.config.jwt).map_err(|_| invalid_refresh())?;

    let session = SessionRepo::find_active_by_refresh_token_hash(
        &state.pool,
        &hash_refresh_token(&token),
    )
    .await?
    .filter(|s| s.user_id == claims.user_id)
    .ok_or_else(invalid_refresh)?;

    // A concurrent refresh may have rotated this session already.
    if !SessionRepo::revoke(&state.pool, session.id).await? {
        return Err(invalid_refresh());
    }

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(invalid_refresh)?;

    let jar = open_session(&state, &user, &meta, jar).await?;
    tracing::info!(user_id = user.id, old_session_id = session.id, "Session rotated");

    Ok((jar, user_response(user.to_public())))
}

/// GET /api/auth/me
pub async fn me(user: AuthUser) -> UserResponse<AuthUser> {
    user_response(user)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue an access/refresh pair, persist the session row and set the cookies.
async fn open_session(
    state: &AppState,
    user: &User,
    meta: &ClientMeta,
    jar: CookieJar,
) -> AppResult<CookieJar> {
    let jwt = &state.config.jwt;
    let access_token = issue_access_token(user.id, &user.email, user.role().as_str(), jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh = issue_refresh_token(user.id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let session = SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: hash_refresh_token(&refresh.token),
            user_agent: meta.user_agent.clone(),
            ip_address: meta.ip_address.clone(),
            expires_at: refresh.expires_at,
        },
    )
    .await?;
    tracing::debug!(user_id = user.id, session_id = session.id, "Session created");

    Ok(set_auth_cookies(jar, access_token, refresh.token, &state.config))
}
