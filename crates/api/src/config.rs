use projex_core::code::DEFAULT_MAX_ATTEMPTS;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long in-flight requests may drain after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Candidate codes tried per project create before giving up (default: `32`).
    pub code_max_attempts: u32,
    /// Admin account created at startup when both seed variables are set.
    pub seed_admin: Option<SeedAdmin>,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

/// Credentials for the startup admin account.
#[derive(Debug, Clone)]
pub struct SeedAdmin {
    pub email: String,
    pub password: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `CODE_MAX_ATTEMPTS`    | `32`                       |
    /// | `SEED_ADMIN_EMAIL`     | unset                      |
    /// | `SEED_ADMIN_PASSWORD`  | unset                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let code_max_attempts: u32 = std::env::var("CODE_MAX_ATTEMPTS")
            .unwrap_or_else(|_| DEFAULT_MAX_ATTEMPTS.to_string())
            .parse()
            .expect("CODE_MAX_ATTEMPTS must be a valid u32");
        assert!(code_max_attempts > 0, "CODE_MAX_ATTEMPTS must be at least 1");

        let seed_admin = match (
            std::env::var("SEED_ADMIN_EMAIL"),
            std::env::var("SEED_ADMIN_PASSWORD"),
        ) {
            (Ok(email), Ok(password)) if !email.is_empty() && !password.is_empty() => {
                Some(SeedAdmin { email, password })
            }
            _ => None,
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            code_max_attempts,
            seed_admin,
            jwt,
        }
    }
}
