//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. `main` calls [`dotenvy::dotenv`] first, so a local `.env` file
//! works too.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use ceva_db::DbConfig;
use serde::Serialize;

/// API configuration. Loaded once at startup and passed into [`AppState`].
///
/// [`AppState`]: crate::state::AppState
#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    /// Interface to bind (API_HOST)
    pub host: String,

    /// HTTP port (API_PORT)
    pub port: u16,

    /// SQLite file (DATABASE_PATH), `:memory:` for a throwaway database
    pub database_path: PathBuf,

    /// Pool size (DB_MAX_CONNECTIONS)
    pub db_max_connections: u32,

    /// Deployment name reported by `/` and `/health` (ENVIRONMENT)
    pub environment: String,

    /// Default tracing filter when RUST_LOG is unset (LOG_LEVEL)
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_path: PathBuf::from("./ceva.db"),
            db_max_connections: 5,
            environment: "development".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (the process environment
    /// in production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            host: lookup("API_HOST").unwrap_or(defaults.host),

            port: match lookup("API_PORT") {
                Some(v) => v
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("API_PORT".to_string()))?,
                None => defaults.port,
            },

            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),

            db_max_connections: match lookup("DB_MAX_CONNECTIONS") {
                Some(v) => v
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()))?,
                None => defaults.db_max_connections,
            },

            environment: lookup("ENVIRONMENT").unwrap_or(defaults.environment),

            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("API_HOST".to_string()))
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        if self.database_path.as_os_str() == ":memory:" {
            DbConfig::in_memory()
        } else {
            DbConfig::new(&self.database_path).max_connections(self.db_max_connections)
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
