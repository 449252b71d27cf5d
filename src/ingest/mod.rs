//! Clients for remote data providers.
//!
//! - `open_meteo`: current conditions from the Open-Meteo forecast API.

pub mod open_meteo;
