//! Service configuration.
//!
//! Loaded from environment variables with fallback to development defaults.

use std::net::SocketAddr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(String),
}

/// Which product store backs the service.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    InMemory,
}

/// Postgres connection settings.
///
/// `url` (from `DATABASE_URL`) takes precedence over the individual parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub store: StoreKind,
    pub database: DatabaseConfig,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_addr = parse("BIND_ADDR", get("BIND_ADDR", "0.0.0.0:8010"))?;

        let store = match get("CATALOG_STORE", "postgres").to_ascii_lowercase().as_str() {
            "postgres" => StoreKind::Postgres,
            "memory" => StoreKind::InMemory,
            _ => return Err(ConfigError::InvalidValue("CATALOG_STORE".to_string())),
        };

        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            host: get("APP_DB_HOST", "localhost"),
            port: parse("APP_DB_PORT", get("APP_DB_PORT", "5432"))?,
            username: get("APP_DB_USERNAME", "postgres"),
            password: get("APP_DB_PASSWORD", "postgres"),
            name: get("APP_DB_NAME", "postgres"),
            ssl_mode: get("APP_DB_SSLMODE", "disable"),
            max_connections: parse("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS", "10"))?,
        };

        if database.max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(Self {
            bind_addr,
            store,
            database,
        })
    }
}

fn parse<T: std::str::FromStr>(key: &str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key.to_string()))
}
