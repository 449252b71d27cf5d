//! Open-Meteo Forecast API Client
//!
//! Retrieves current conditions (temperature, wind speed, WMO weather code)
//! for a coordinate. No API key is required.
//!
//! API Documentation: https://open-meteo.com/en/docs
//! Current conditions: /v1/forecast?latitude=..&longitude=..&current_weather=true

use crate::logging;
use crate::model::{Coordinates, WeatherReading};
use serde::Deserialize;
use std::time::Duration;

pub const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1";

/// Request timeout applied when the configuration does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// Errors
// ============================================================================

/// Why a current-conditions lookup produced no reading.
///
/// Callers of [`WeatherSource::fetch_current`] only ever see "no data"; this
/// type exists so the cause can be logged and tested.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("HTTP error: {status}{}", fmt_reason(.reason))]
    HttpStatus { status: u16, reason: Option<String> },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Response missing current_weather object")]
    MissingCurrentWeather,
}

fn fmt_reason(reason: &Option<String>) -> String {
    reason.as_deref().map(|r| format!(" ({})", r)).unwrap_or_default()
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WeatherError::Timeout(err)
        } else {
            WeatherError::Network(err)
        }
    }
}

// ============================================================================
// Open-Meteo API Response Structures
// ============================================================================

/// Forecast response; only the `current_weather` block is used.
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64, // °C
    windspeed: f64,   // km/h
    weathercode: f64, // integral WMO code, occasionally serialized as a float
}

/// Error body returned with 4xx responses, e.g. for out-of-range coordinates.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    reason: Option<String>,
}

// ============================================================================
// URL construction and parsing
// ============================================================================

/// Builds the current-conditions URL for `coords` under `base_url`.
pub fn build_current_weather_url(base_url: &str, coords: Coordinates) -> String {
    format!(
        "{}/forecast?latitude={}&longitude={}&current_weather=true",
        base_url.trim_end_matches('/'),
        coords.lat,
        coords.lon
    )
}

/// Parses a forecast response body into a [`WeatherReading`].
pub fn parse_current_weather(body: &str) -> Result<WeatherReading, WeatherError> {
    let response: ForecastResponse =
        serde_json::from_str(body).map_err(|e| WeatherError::Parse(e.to_string()))?;

    let current = response
        .current_weather
        .ok_or(WeatherError::MissingCurrentWeather)?;

    let code = current.weathercode;
    if code.fract() != 0.0 || code < i32::MIN as f64 || code > i32::MAX as f64 {
        return Err(WeatherError::Parse(format!(
            "weathercode {} is not an integer",
            code
        )));
    }

    Ok(WeatherReading {
        temperature_celsius: current.temperature,
        windspeed_kmh: current.windspeed,
        weather_code: code as i32,
    })
}

// ============================================================================
// API Client
// ============================================================================

/// Anything that can report current conditions for a coordinate.
pub trait WeatherSource {
    /// Current conditions at `coords`, or `None` when no data could be had.
    fn fetch_current(&self, coords: Coordinates) -> Option<WeatherReading>;
}

/// Blocking Open-Meteo client.
pub struct OpenMeteoClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl OpenMeteoClient {
    /// Creates a client against `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, WeatherError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches current conditions, keeping the failure cause.
    pub fn fetch_current_checked(
        &self,
        coords: Coordinates,
    ) -> Result<WeatherReading, WeatherError> {
        let url = build_current_weather_url(&self.base_url, coords);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let reason = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.reason);
            return Err(WeatherError::HttpStatus {
                status: status.as_u16(),
                reason,
            });
        }

        parse_current_weather(&body)
    }
}

impl WeatherSource for OpenMeteoClient {
    fn fetch_current(&self, coords: Coordinates) -> Option<WeatherReading> {
        match self.fetch_current_checked(coords) {
            Ok(reading) => Some(reading),
            Err(e) => {
                logging::log_weather_failure(&coords.to_string(), "current weather", &e);
                None
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
