//! Service configuration.
//!
//! Settings come from an optional TOML file plus a couple of environment
//! overrides (a `.env` file in the working directory is honored):
//!
//! - `CLIMATE_CONFIG`: path to the TOML file (default `./climate.toml`; a
//!   missing default file just means built-in defaults)
//! - `CLIMATE_REPORTS_FILE`: overrides `[store] reports_file`
//! - `RUST_LOG`: overrides `[logging] level`
//!
//! ```toml
//! [store]
//! reports_file = "community_reports.csv"
//!
//! [weather]
//! base_url = "https://api.open-meteo.com/v1"
//! timeout_secs = 10
//!
//! [logging]
//! level = "info"
//! ```

use crate::ingest::open_meteo::{DEFAULT_TIMEOUT, OPEN_METEO_BASE_URL};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "climate.toml";
pub const DEFAULT_REPORTS_FILE: &str = "community_reports.csv";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid setting in {path}: {message}")]
    Invalid { path: String, message: String },
}

// ---------------------------------------------------------------------------
// Config sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub reports_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            reports_file: PathBuf::from(DEFAULT_REPORTS_FILE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: OPEN_METEO_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `env_logger`-style filter, e.g. `"info"` or `"climate_service=debug"`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub weather: WeatherConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl AppConfig {
    /// Parses a TOML document; absent sections and keys take defaults.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        // A zero reqwest timeout fails every request immediately.
        if self.weather.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                path: origin.to_string(),
                message: "[weather] timeout_secs must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Reads `path`. When `required` is false a missing file yields defaults.
    pub fn from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let origin = path.display().to_string();
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text, &origin),
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: origin,
                source,
            }),
        }
    }

    /// Applies environment-style overrides on top of file settings.
    pub fn with_overrides(mut self, reports_file: Option<String>) -> Self {
        if let Some(path) = reports_file.filter(|p| !p.trim().is_empty()) {
            self.store.reports_file = PathBuf::from(path);
        }
        self
    }
}

/// Loads configuration from `.env`, `CLIMATE_CONFIG`, and `CLIMATE_REPORTS_FILE`.
pub fn load() -> Result<AppConfig, ConfigError> {
    dotenv::dotenv().ok();

    let (path, required) = match std::env::var("CLIMATE_CONFIG") {
        Ok(p) => (PathBuf::from(p), true),
        Err(_) => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };

    let config = AppConfig::from_file(&path, required)?;
    Ok(config.with_overrides(std::env::var("CLIMATE_REPORTS_FILE").ok()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
