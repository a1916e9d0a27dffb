//! Application settings.
//!
//! Settings come from the process environment, optionally seeded from
//! `.env` files via dotenvy. `APP_ENV` selects an additional overlay file
//! (`.env.development`, `.env.test`, ...) whose values take precedence
//! over the plain `.env`.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::logging::LogConfig;

/// Application settings, loaded once at startup and read-only afterward.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Application name (used in logs)
    pub app_name: String,
    /// Deployment environment (development, test, production, ...)
    pub app_env: String,
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level; "debug" unlocks DEBUG console output
    pub log_level: String,
    /// Directory receiving the rotating log files
    pub log_file_path: PathBuf,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Whether a client-supplied `request_id` header is adopted
    pub adopt_request_id: bool,
}

impl Settings {
    /// Load settings from `.env` files and the process environment.
    ///
    /// Values already present in the environment always win; dotenvy never
    /// overrides existing variables, so the overlay file is loaded first.
    pub fn load() -> Result<Self> {
        if let Ok(env) = std::env::var("APP_ENV") {
            dotenvy::from_filename(format!(".env.{}", env)).ok();
        }
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (injectable for tests).
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match get("APP_PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("Invalid APP_PORT: {}", v))?,
            None => 8000,
        };

        let adopt_request_id = match get("ADOPT_REQUEST_ID") {
            Some(v) => parse_bool(&v).with_context(|| format!("Invalid ADOPT_REQUEST_ID: {}", v))?,
            None => true,
        };

        Ok(Self {
            app_name: get("APP_NAME").unwrap_or_else(|| "itemstore".to_string()),
            app_env: get("APP_ENV").unwrap_or_else(|| "development".to_string()),
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_file_path: PathBuf::from(get("LOG_FILE_PATH").unwrap_or_else(|| "logs".to_string())),
            database_path: PathBuf::from(
                get("DATABASE_PATH").unwrap_or_else(|| itemstore_storage::DATABASE_FILE.to_string()),
            ),
            adopt_request_id,
        })
    }

    /// Logging configuration derived from these settings.
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            level: self.log_level.clone(),
            directory: self.log_file_path.clone(),
        }
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("not a boolean: {}", other),
    }
}
