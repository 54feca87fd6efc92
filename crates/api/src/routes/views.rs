use axum::routing::post;
use axum::Router;

use crate::handlers::views;
use crate::state::AppState;

/// Routes mounted at `/views`.
///
/// ```text
/// POST / -> record_view (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(views::record_view))
}
