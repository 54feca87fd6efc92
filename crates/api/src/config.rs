use crate::auth::jwt::JwtConfig;

/// Origins allowed outside production.
const DEV_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:3001"];

/// Server configuration loaded from environment variables.
///
/// Defaults target local development. Production deployments set
/// `NODE_ENV=production` and list their frontends in `CLIENT_URLS`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4000`).
    pub port: u16,
    /// Deployment environment name (default: `development`).
    pub environment: String,
    /// Whether auth cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
    /// Allowed CORS origins.
    pub cors_origins: Vec<String>,
    /// Take the client IP from `x-forwarded-for` instead of the peer address.
    /// Only safe behind a reverse proxy that overwrites the header.
    pub trust_proxy: bool,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                                  |
    /// |------------------------|------------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                                |
    /// | `PORT`                 | `4000`                                   |
    /// | `NODE_ENV`             | `development`                            |
    /// | `COOKIE_SECURE`        | `false` (forced on in production)        |
    /// | `CLIENT_URLS`          | `CLIENT_URL`, then `http://localhost:3000` (production only) |
    /// | `TRUST_PROXY`          | `false`                                  |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                                     |
    ///
    /// # Panics
    ///
    /// Panics on unparsable numbers or a missing `JWT_SECRET`; misconfiguration
    /// must stop the process before it binds.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "4000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let environment = std::env::var("NODE_ENV")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "development".into());
        let is_production = environment == "production";

        let cookie_secure = std::env::var("COOKIE_SECURE").is_ok_and(|v| v == "true") || is_production;

        let cors_origins = if is_production {
            let raw = std::env::var("CLIENT_URLS")
                .or_else(|_| std::env::var("CLIENT_URL"))
                .unwrap_or_else(|_| "http://localhost:3000".into());
            split_origins(&raw)
        } else {
            DEV_CORS_ORIGINS.iter().map(|s| s.to_string()).collect()
        };

        let trust_proxy = std::env::var("TRUST_PROXY").is_ok_and(|v| v == "true");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            environment,
            cookie_secure,
            cors_origins,
            trust_proxy,
            request_timeout_secs,
            jwt,
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Development mode adds `details` to internal error responses.
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
