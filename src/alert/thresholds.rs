//! Heat threshold checking.
//!
//! A reading carries no alert state of its own; the station view asks this
//! module whether the temperature warrants an advisory each time it renders.

use crate::model::WeatherReading;

/// Temperatures strictly above this raise a high-heat advisory, in °C.
pub const HEAT_ALERT_THRESHOLD_C: f64 = 31.0;

/// A high-heat advisory for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatAlert {
    pub location: String,
    pub temperature_celsius: f64,
    pub message: String,
}

/// True when `temperature_celsius` exceeds [`HEAT_ALERT_THRESHOLD_C`].
///
/// The boundary is exclusive: exactly 31.0 °C does not alert.
pub fn exceeds_heat_threshold(temperature_celsius: f64) -> bool {
    temperature_celsius > HEAT_ALERT_THRESHOLD_C
}

/// Checks a reading taken at `location` and returns an advisory if it is
/// too hot.
///
/// Returns `None` at or below the threshold.
pub fn check_heat(reading: &WeatherReading, location: &str) -> Option<HeatAlert> {
    if !exceeds_heat_threshold(reading.temperature_celsius) {
        return None;
    }

    Some(HeatAlert {
        location: location.to_string(),
        temperature_celsius: reading.temperature_celsius,
        message: format!(
            "High Heat Alert in {}! Advise residents to stay indoors.",
            location
        ),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
