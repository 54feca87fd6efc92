use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via axum's `State` extractor.
///
/// Cloning is cheap: the pool is reference-counted internally and the config
/// sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// MySQL connection pool, closed by `main` after shutdown.
    pub pool: tratics_db::DbPool,
    /// Server configuration (cookies, JWT secrets, CORS origins).
    pub config: Arc<ServerConfig>,
}
