//! MySQL persistence for Tratics: pool construction, migrations, row models
//! and repositories.

use std::str::FromStr;
use std::time::Duration;

use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::MySqlPool;

/// Default upper bound on pooled connections.
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Default MySQL port when `DB_PORT` is unset or unparsable.
const DEFAULT_DB_PORT: u16 = 3306;

/// Variables that must be present unless `DATABASE_URL` is set.
const REQUIRED_VARS: [&str; 4] = ["DB_HOST", "DB_USER", "DB_PASSWORD", "DB_NAME"];

#[derive(Debug, thiserror::Error)]
pub enum DbConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),

    #[error("Invalid DATABASE_URL: {0}")]
    InvalidUrl(#[source] sqlx::Error),
}

/// Connection settings for the pool.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub connect: MySqlConnectOptions,
    pub pool_size: u32,
}

impl DbConfig {
    /// Load database settings from the environment.
    ///
    /// | Env Var        | Required                          | Default |
    /// |----------------|-----------------------------------|---------|
    /// | `DATABASE_URL` | no (overrides the `DB_*` vars)    | --      |
    /// | `DB_HOST`      | yes, unless `DATABASE_URL` is set | --      |
    /// | `DB_PORT`      | no                                | `3306`  |
    /// | `DB_USER`      | yes, unless `DATABASE_URL` is set | --      |
    /// | `DB_PASSWORD`  | yes, unless `DATABASE_URL` is set | --      |
    /// | `DB_NAME`      | yes, unless `DATABASE_URL` is set | --      |
    /// | `DB_POOL_SIZE` | no                                | `10`    |
    pub fn from_env() -> Result<Self, DbConfigError> {
        let pool_size = std::env::var("DB_POOL_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|n: &u32| *n > 0)
            .unwrap_or(DEFAULT_POOL_SIZE);

        if let Ok(url) = std::env::var("DATABASE_URL") {
            let connect = MySqlConnectOptions::from_str(&url).map_err(DbConfigError::InvalidUrl)?;
            return Ok(Self { connect, pool_size });
        }

        let missing: Vec<&'static str> = REQUIRED_VARS
            .into_iter()
            .filter(|key| std::env::var(key).map(|v| v.is_empty()).unwrap_or(true))
            .collect();
        if !missing.is_empty() {
            return Err(DbConfigError::MissingVars(missing));
        }

        let var = |key: &str| std::env::var(key).unwrap_or_default();
        let port = std::env::var("DB_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_DB_PORT);

        let connect = MySqlConnectOptions::new()
            .host(&var("DB_HOST"))
            .port(port)
            .username(&var("DB_USER"))
            .password(&var("DB_PASSWORD"))
            .database(&var("DB_NAME"))
            .charset("utf8mb4");

        Ok(Self { connect, pool_size })
    }
}

/// Create a bounded connection pool. Connections are acquired per query.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(config.pool_size)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(config.connect.clone())
        .await
}

/// Round-trip a trivial query to prove the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply any pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
