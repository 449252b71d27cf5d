//! Structured logging for the climate service.
//!
//! Log lines are tagged with the data source they concern and, where one
//! applies, the location name, so a failing weather call or a skipped report
//! row can be traced back to its origin. Output goes through the `log` facade;
//! `init_logger` installs `pretty_env_logger` as the backend.

use crate::ingest::open_meteo::WeatherError;
use std::fmt;

// ---------------------------------------------------------------------------
// Data Source Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    OpenMeteo,
    Store,
    Registry,
    System,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::OpenMeteo => write!(f, "OPEN-METEO"),
            DataSource::Store => write!(f, "STORE"),
            DataSource::Registry => write!(f, "REGISTRY"),
            DataSource::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - remote host briefly unreachable or slow
    Expected,
    /// Unexpected failure - indicates an API change or a local fault
    Unexpected,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
        }
    }
}

// ---------------------------------------------------------------------------
// Initialization
// ---------------------------------------------------------------------------

/// Installs the global logger.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (e.g. `"info"`)
/// applies. Calling this twice is harmless: the second install is ignored.
pub fn init_logger(default_filter: &str) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    let _ = pretty_env_logger::formatted_builder()
        .parse_filters(&filter)
        .try_init();
}

fn tagged(source: DataSource, site: Option<&str>, message: &str) -> String {
    match site {
        Some(name) => format!("{} [{}]: {}", source, name, message),
        None => format!("{}: {}", source, message),
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

pub fn info(source: DataSource, site: Option<&str>, message: &str) {
    log::info!("{}", tagged(source, site, message));
}

pub fn warn(source: DataSource, site: Option<&str>, message: &str) {
    log::warn!("{}", tagged(source, site, message));
}

pub fn error(source: DataSource, site: Option<&str>, message: &str) {
    log::error!("{}", tagged(source, site, message));
}

pub fn debug(source: DataSource, site: Option<&str>, message: &str) {
    log::debug!("{}", tagged(source, site, message));
}

// ---------------------------------------------------------------------------
// Failure Classification Helpers
// ---------------------------------------------------------------------------

/// Classify a weather lookup failure by its cause.
pub fn classify_weather_failure(err: &WeatherError) -> FailureType {
    match err {
        // Flaky connectivity is routine for a dashboard; the next view retries.
        WeatherError::Timeout(_) | WeatherError::Network(_) => FailureType::Expected,
        WeatherError::HttpStatus { status, .. } if *status >= 500 => FailureType::Expected,
        // Response shape or request contract changed under us.
        WeatherError::HttpStatus { .. }
        | WeatherError::Parse(_)
        | WeatherError::MissingCurrentWeather => FailureType::Unexpected,
    }
}

/// Log a weather lookup failure with automatic classification.
pub fn log_weather_failure(location: &str, operation: &str, err: &WeatherError) {
    let failure_type = classify_weather_failure(err);
    let message = format!("{} failed [{}]: {}", operation, failure_type, err);

    match failure_type {
        FailureType::Expected => debug(DataSource::OpenMeteo, Some(location), &message),
        FailureType::Unexpected => error(DataSource::OpenMeteo, Some(location), &message),
    }
}

// ---------------------------------------------------------------------------
// Scan Summary Logging
// ---------------------------------------------------------------------------

/// Log the outcome of a full read of the report collection.
pub fn log_scan_summary(path: &str, loaded: usize, skipped: usize) {
    let message = format!("Read {} reports, skipped {} malformed rows", loaded, skipped);

    if skipped == 0 {
        debug(DataSource::Store, Some(path), &message);
    } else if loaded == 0 {
        error(DataSource::Store, Some(path), &message);
    } else {
        warn(DataSource::Store, Some(path), &message);
    }
}
