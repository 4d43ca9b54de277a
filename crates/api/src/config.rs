//! # API Configuration Module
//!
//! Loads the server and engine configuration from environment variables,
//! with defaults where a value is optional.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string; when unset the in-memory store is used
//! - `SEED_FILE`: JSON file of units and processes loaded into the in-memory store
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Whole-request timeout (default: 30)
//! - `STORE_TIMEOUT_MS`: Bound on every store call made by the engine (default: 5000)
//! - `SLOT_FIRST` / `SLOT_LAST` / `SLOT_STEP_MINUTES`: Slot grid (default: 09:00, 17:00, 30)
//! - `HOLIDAYS`: Comma-separated `YYYY-MM-DD` dates that are never bookable

use std::{env, fmt::Display, str::FromStr, time::Duration};

use chrono::NaiveDate;
use eyre::{eyre, Result, WrapErr};
use residency_core::{calendar::SlotGrid, models::time_slot::TimeSlot, services::EngineSettings};
use tracing::Level;

/// Configuration for the residency API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use residency_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}:{}", config.host, config.port);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL connection string; `None` selects the in-memory store
    pub database_url: Option<String>,

    /// Seed data for the in-memory store
    pub seed_file: Option<String>,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Per store call timeout in milliseconds
    pub store_timeout_ms: u64,

    pub slot_first: TimeSlot,
    pub slot_last: TimeSlot,
    pub slot_step_minutes: u32,

    /// Dates never offered for booking
    pub holidays: Vec<NaiveDate>,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any set variable cannot be parsed, or if the slot
    /// grid it describes is empty or reversed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Network settings
        let host = lookup("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "API_PORT", 3000)?;

        // Storage settings
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let seed_file = lookup("SEED_FILE").filter(|path| !path.trim().is_empty());

        // Logging settings
        let log_level = parse_or(&lookup, "LOG_LEVEL", Level::INFO)?;

        // CORS settings
        let cors_origins = lookup("API_CORS_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        // Performance settings
        let request_timeout = parse_or(&lookup, "API_REQUEST_TIMEOUT_SECONDS", 30)?;
        let store_timeout_ms = parse_or(&lookup, "STORE_TIMEOUT_MS", 5000)?;

        // Engine settings
        let slot_first: TimeSlot = lookup("SLOT_FIRST")
            .unwrap_or_else(|| "09:00".to_string())
            .parse()
            .map_err(|e| eyre!("Invalid SLOT_FIRST value: {}", e))?;
        let slot_last: TimeSlot = lookup("SLOT_LAST")
            .unwrap_or_else(|| "17:00".to_string())
            .parse()
            .map_err(|e| eyre!("Invalid SLOT_LAST value: {}", e))?;
        let slot_step_minutes = parse_or(&lookup, "SLOT_STEP_MINUTES", 30)?;

        let holidays = lookup("HOLIDAYS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| {
                        NaiveDate::parse_from_str(s, "%Y-%m-%d")
                            .wrap_err_with(|| format!("Invalid HOLIDAYS entry: {}", s))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();

        let config = Self {
            host,
            port,
            database_url,
            seed_file,
            log_level,
            cors_origins,
            request_timeout,
            store_timeout_ms,
            slot_first,
            slot_last,
            slot_step_minutes,
            holidays,
        };

        // Reject a bad grid at startup rather than on the first request
        config.engine_settings()?;

        Ok(config)
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Engine settings described by this configuration
    pub fn engine_settings(&self) -> Result<EngineSettings> {
        let grid = SlotGrid::new(self.slot_first, self.slot_last, self.slot_step_minutes)
            .wrap_err("Invalid slot grid configuration")?;

        Ok(EngineSettings {
            grid,
            holidays: self.holidays.clone(),
            store_timeout: Duration::from_millis(self.store_timeout_ms),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| eyre!("Invalid {} value '{}': {}", key, raw, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<ApiConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.database_url, None);
        assert_eq!(config.log_level, Level::INFO);
        assert_eq!(config.request_timeout, 30);

        let settings = config.engine_settings().unwrap();
        assert_eq!(settings.grid, SlotGrid::default());
        assert_eq!(settings.store_timeout, Duration::from_millis(5000));
        assert!(settings.holidays.is_empty());
    }

    #[test]
    fn test_custom_grid_and_holidays() {
        let config = config_from(&[
            ("SLOT_FIRST", "08:00"),
            ("SLOT_LAST", "12:00"),
            ("SLOT_STEP_MINUTES", "60"),
            ("HOLIDAYS", "2026-12-25, 2027-01-01"),
            ("STORE_TIMEOUT_MS", "250"),
        ])
        .unwrap();

        let settings = config.engine_settings().unwrap();
        assert_eq!(settings.grid.len(), 5);
        assert_eq!(settings.holidays.len(), 2);
        assert_eq!(settings.store_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[("API_PORT", "not-a-port")]).is_err());
        assert!(config_from(&[("STORE_TIMEOUT_MS", "-1")]).is_err());
        assert!(config_from(&[("HOLIDAYS", "25/12/2026")]).is_err());
        assert!(config_from(&[("SLOT_FIRST", "18:00")]).is_err());
        assert!(config_from(&[("SLOT_STEP_MINUTES", "0")]).is_err());
        assert!(config_from(&[("LOG_LEVEL", "verbose")]).is_err());
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let config = config_from(&[("LOG_LEVEL", "DEBUG")]).unwrap();
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn test_blank_database_url_selects_memory_store() {
        let config = config_from(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(config.database_url, None);
    }
}
