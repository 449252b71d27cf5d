//! Community climate-incident reporting for Trinidad & Tobago.
//!
//! Residents pin hazards (flooding, heat, landslides, erosion) on a shared
//! map and check live conditions for registered towns. The library holds
//! the location registry, the append-only report store, the Open-Meteo
//! client, and the dashboard flows built from them; `main.rs` is a thin
//! command-line front end.

pub mod alert;
pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod ingest;
pub mod locations;
pub mod logging;
pub mod model;
pub mod store;
