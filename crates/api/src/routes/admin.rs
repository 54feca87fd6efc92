//! Route definitions for `/admin`.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. All require the admin role.
///
/// ```text
/// GET    /dashboard      -> dashboard
/// GET    /users          -> list_users
/// GET    /users/{id}     -> get_user
/// PATCH  /users/{id}     -> update_user
/// DELETE /users/{id}     -> delete_user
/// GET    /stats/views    -> view_stats
/// GET    /stats/users    -> user_stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(admin::dashboard))
        .route("/users", get(admin::list_users))
        .route(
            "/users/{id}",
            get(admin::get_user)
                .patch(admin::update_user)
                .delete(admin::delete_user),
        )
        .route("/stats/views", get(admin::view_stats))
        .route("/stats/users", get(admin::user_stats))
}
