use std::sync::atomic::{AtomicBool, Ordering};

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sqlx::mysql::MySqlDatabaseError;
use tratics_core::error::CoreError;

/// MySQL `ER_ACCESS_DENIED_ERROR`.
const ER_ACCESS_DENIED: u16 = 1045;
/// MySQL `ER_NO_SUCH_TABLE`.
const ER_NO_SUCH_TABLE: u16 = 1146;

const INTERNAL_MESSAGE: &str = "Internal server error";
const CONNECT_MESSAGE: &str = "Cannot connect to database. Check your database credentials.";

/// Whether internal error responses carry a `details` field.
static EXPOSE_DETAILS: AtomicBool = AtomicBool::new(false);

/// Toggle the `details` field on 500 responses. Set once at startup from
/// [`ServerConfig::is_development`](crate::config::ServerConfig::is_development).
pub fn set_expose_details(enabled: bool) {
    EXPOSE_DETAILS.store(enabled, Ordering::Relaxed);
}

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the `{ ok: false, message }` envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `tratics_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };

        let body = if status.is_server_error() && EXPOSE_DETAILS.load(Ordering::Relaxed) {
            json!({ "ok": false, "message": message, "details": self.to_string() })
        } else {
            json!({ "ok": false, "message": message })
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Classify a sqlx error into an HTTP status and a client-safe message.
///
/// - `RowNotFound` maps to 404.
/// - Duplicate keys map to 409.
/// - Missing tables, bad credentials and unreachable servers keep 500 but
///   name the operational problem.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    match err {
        sqlx::Error::RowNotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
        sqlx::Error::Database(db_err) => {
            if db_err.is_unique_violation() {
                return (
                    StatusCode::CONFLICT,
                    "Duplicate value violates a unique constraint".to_string(),
                );
            }
            tracing::error!(error = %db_err, "Database error");
            let number = db_err
                .try_downcast_ref::<MySqlDatabaseError>()
                .map(MySqlDatabaseError::number);
            let message = match number {
                Some(ER_NO_SUCH_TABLE) => {
                    "Database table does not exist. Please run the database migration."
                }
                Some(ER_ACCESS_DENIED) => "Database access denied. Check your database credentials.",
                _ => INTERNAL_MESSAGE,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
        }
        sqlx::Error::PoolTimedOut => {
            tracing::error!(error = %err, "Database pool timed out");
            (StatusCode::INTERNAL_SERVER_ERROR, CONNECT_MESSAGE.to_string())
        }
        sqlx::Error::Io(io) if io.kind() == std::io::ErrorKind::ConnectionRefused => {
            tracing::error!(error = %io, "Database connection refused");
            (StatusCode::INTERNAL_SERVER_ERROR, CONNECT_MESSAGE.to_string())
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_keep_their_message() {
        let response = AppError::Core(CoreError::Conflict("Email already exists".into()))
            .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn row_not_found_is_404() {
        let (status, _) = classify_sqlx_error(&sqlx::Error::RowNotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn pool_timeout_names_the_connection_problem() {
        let (status, message) = classify_sqlx_error(&sqlx::Error::PoolTimedOut);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, CONNECT_MESSAGE);
    }

    #[test]
    fn refused_connection_names_the_connection_problem() {
        let io = std::io::Error::from(std::io::ErrorKind::ConnectionRefused);
        let (_, message) = classify_sqlx_error(&sqlx::Error::Io(io));
        assert_eq!(message, CONNECT_MESSAGE);
    }
}
