//! # API Configuration Module
//!
//! Loads the SlotBook server configuration from environment variables and
//! provides defaults where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 4000)
//! - `STORE_BACKEND`: `memory` or `postgres` (default: `postgres` when
//!   `DATABASE_URL` is set, `memory` otherwise)
//! - `DATABASE_URL`: PostgreSQL connection string (required for `postgres`)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins, or `*`
//! - `API_REQUEST_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `API_STRICT_LABELS`: Reject writes to non-canonical slot labels (default: false)
//! - `ADMIN_USERNAME`: Admin account name; enables admin authentication
//! - `ADMIN_PASSWORD_HASH`: Argon2 PHC hash of the admin password
//! - `ADMIN_PASSWORD`: Plain admin password, hashed at startup when no hash is set
//! - `SESSION_SECRET`: Secret for signing session tokens (default: random per process)
//! - `SESSION_TTL_MINUTES`: Session token lifetime (default: 720)

use eyre::{eyre, Result, WrapErr};
use std::{env, str::FromStr};
use tracing::Level;

use crate::middleware::auth::{hash_password, AdminCredentials};

/// Which [`SlotStore`](slotbook_db::store::SlotStore) implementation backs the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Volatile map, lost on restart
    Memory,
    /// PostgreSQL `day_slots` table
    Postgres,
}

impl FromStr for StoreBackend {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            other => Err(eyre!("Unknown STORE_BACKEND value: {other}")),
        }
    }
}

/// Configuration for the SlotBook API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotbook_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// Storage backend selection
    pub store_backend: StoreBackend,

    /// PostgreSQL database connection string
    pub database_url: Option<String>,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional); `["*"]` allows any origin
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Reject writes whose time label is not one of the 32 canonical labels
    pub strict_labels: bool,

    /// Admin account; `None` leaves the write endpoint unauthenticated
    pub admin: Option<AdminCredentials>,

    /// Secret for signing session tokens
    pub session_secret: Option<String>,

    /// Session token lifetime in minutes
    pub session_ttl_minutes: u32,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - A numeric or boolean value cannot be parsed
    /// - `STORE_BACKEND` is unknown, or `postgres` without `DATABASE_URL`
    /// - Only one of the admin username and password is set
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = var("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = var("API_PORT")
            .unwrap_or_else(|| "4000".to_string())
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Storage settings
        let database_url = var("DATABASE_URL").filter(|url| !url.is_empty());
        let store_backend = match var("STORE_BACKEND") {
            Some(backend) => backend.parse()?,
            None if database_url.is_some() => StoreBackend::Postgres,
            None => StoreBackend::Memory,
        };
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(eyre!(
                "DATABASE_URL environment variable must be set for the postgres backend"
            ));
        }

        // Logging settings
        let log_level = match var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()).as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = var("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = var("API_REQUEST_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .wrap_err("Invalid API_REQUEST_TIMEOUT_SECONDS value")?;

        let strict_labels = match var("API_STRICT_LABELS") {
            Some(value) => parse_bool(&value).wrap_err("Invalid API_STRICT_LABELS value")?,
            None => false,
        };

        // Security settings
        let admin = match (
            var("ADMIN_USERNAME"),
            var("ADMIN_PASSWORD_HASH"),
            var("ADMIN_PASSWORD"),
        ) {
            (None, None, None) => None,
            (Some(username), Some(password_hash), _) => Some(AdminCredentials {
                username,
                password_hash,
            }),
            (Some(username), None, Some(password)) => Some(AdminCredentials {
                username,
                password_hash: hash_password(&password)?,
            }),
            (Some(_), None, None) => {
                return Err(eyre!(
                    "ADMIN_USERNAME requires ADMIN_PASSWORD_HASH or ADMIN_PASSWORD"
                ));
            }
            (None, _, _) => {
                return Err(eyre!("An admin password is set but ADMIN_USERNAME is missing"));
            }
        };

        let session_secret = var("SESSION_SECRET").filter(|secret| !secret.is_empty());
        let session_ttl_minutes = var("SESSION_TTL_MINUTES")
            .unwrap_or_else(|| "720".to_string())
            .parse()
            .wrap_err("Invalid SESSION_TTL_MINUTES value")?;

        Ok(Self {
            host,
            port,
            store_backend,
            database_url,
            log_level,
            cors_origins,
            request_timeout,
            strict_labels,
            admin,
            session_secret,
            session_ttl_minutes,
        })
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(eyre!("Expected a boolean, got {other}")),
    }
}
