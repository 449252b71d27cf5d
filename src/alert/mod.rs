//! Alert rules derived from live readings.
//!
//! - `thresholds`: high-heat advisory check.

pub mod thresholds;
