//! Route definitions for the caller's own profile and lists.

use axum::routing::get;
use axum::Router;

use crate::handlers::me;
use crate::state::AppState;

/// Routes mounted at `/me`. All require auth.
///
/// ```text
/// GET    /             -> get_profile
/// GET    /lists        -> get_lists
/// POST   /lists        -> add_to_list
/// DELETE /lists        -> remove_from_list
/// GET    /lists/check  -> check_list_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(me::get_profile))
        .route(
            "/lists",
            get(me::get_lists)
                .post(me::add_to_list)
                .delete(me::remove_from_list),
        )
        .route("/lists/check", get(me::check_list_status))
}
