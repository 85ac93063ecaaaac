use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use folio_core::retry::RetryPolicy;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// SQLite database file, relative to the working directory
    /// (default: `portfolio.db`).
    pub database_path: PathBuf,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// Empty means any origin is allowed.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How many times storage initialization is attempted (default: `3`).
    pub db_init_attempts: u32,
    /// Pause between initialization attempts in milliseconds (default: `2000`).
    pub db_init_retry_delay_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            database_path: PathBuf::from("portfolio.db"),
            cors_origins: Vec::new(),
            request_timeout_secs: 30,
            db_init_attempts: 3,
            db_init_retry_delay_ms: 2000,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default         |
    /// |--------------------------|-----------------|
    /// | `HOST`                   | `0.0.0.0`       |
    /// | `PORT`                   | `5000`          |
    /// | `DATABASE_PATH`          | `portfolio.db`  |
    /// | `CORS_ORIGINS`           | `*`             |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`            |
    /// | `DB_INIT_ATTEMPTS`       | `3`             |
    /// | `DB_INIT_RETRY_DELAY_MS` | `2000`          |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_or(&lookup, "PORT", defaults.port)?;
        let database_path = lookup("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);
        let cors_origins = parse_origins(lookup("CORS_ORIGINS"))?;
        let request_timeout_secs =
            parse_or(&lookup, "REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?;
        let db_init_attempts = parse_or(&lookup, "DB_INIT_ATTEMPTS", defaults.db_init_attempts)?;
        let db_init_retry_delay_ms = parse_or(
            &lookup,
            "DB_INIT_RETRY_DELAY_MS",
            defaults.db_init_retry_delay_ms,
        )?;

        if db_init_attempts == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_INIT_ATTEMPTS",
                value: "0".into(),
            });
        }

        Ok(Self {
            host,
            port,
            database_path,
            cors_origins,
            request_timeout_secs,
            db_init_attempts,
            db_init_retry_delay_ms,
        })
    }

    /// Retry policy for storage initialization at startup.
    pub fn init_retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.db_init_attempts,
            Duration::from_millis(self.db_init_retry_delay_ms),
        )
    }

    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

/// `*` or an unset variable means any origin.
fn parse_origins(raw: Option<String>) -> Result<Vec<String>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    let origins: Vec<String> = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if origins.iter().any(|o| o == "*") {
        return Ok(Vec::new());
    }

    for origin in &origins {
        if HeaderValue::from_str(origin).is_err() {
            return Err(ConfigError::Invalid {
                var: "CORS_ORIGINS",
                value: origin.clone(),
            });
        }
    }

    Ok(origins)
}
