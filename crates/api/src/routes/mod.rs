pub mod admin;
pub mod auth;
pub mod docs;
pub mod health;
pub mod me;
pub mod views;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth       register, login, logout, refresh, me
/// /me         profile and list memberships (auth required)
/// /admin      user management and analytics (admin only)
/// /views      page-view tracking (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/me", me::router())
        .nest("/admin", admin::router())
        .nest("/views", views::router())
}
