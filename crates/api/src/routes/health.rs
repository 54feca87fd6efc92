use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    /// `"ok"` or `"degraded"`.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Service banner returned at `/`.
#[derive(Serialize)]
pub struct IndexResponse {
    pub ok: bool,
    pub message: &'static str,
    pub version: &'static str,
    pub health: &'static str,
    pub documentation: &'static str,
    pub endpoints: IndexEndpoints,
}

#[derive(Serialize)]
pub struct IndexEndpoints {
    pub auth: &'static str,
    pub me: &'static str,
    pub admin: &'static str,
    pub views: &'static str,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = tratics_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        ok: db_healthy,
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        timestamp: chrono::Utc::now(),
    })
}

/// GET / -- service banner.
async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        ok: true,
        message: "Welcome to the Tratics API",
        version: env!("CARGO_PKG_VERSION"),
        health: "/health",
        documentation: "/docs",
        endpoints: IndexEndpoints {
            auth: "/api/auth",
            me: "/api/me",
            admin: "/api/admin",
            views: "/api/views",
        },
    })
}

/// Mount health and banner routes (root level, not under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
}
