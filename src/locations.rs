//! Location registry for the Trinidad & Tobago climate dashboard.
//!
//! Defines the canonical list of towns residents can pick from when filing a
//! report or checking the weather, along with their coordinates. This is the
//! single source of truth for place names; all other modules should resolve
//! locations from here rather than hardcoding coordinates.

use crate::model::Coordinates;
use std::fmt;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    /// The name is not in [`LOCATION_REGISTRY`].
    #[error("Location not found: {0}")]
    NotFound(String),
}

// ---------------------------------------------------------------------------
// Location metadata
// ---------------------------------------------------------------------------

/// Where a town sits on the islands; used to group the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    NorthNorthwest,
    EastWestCorridor,
    EastNortheast,
    Central,
    SouthSouthwest,
    Tobago,
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::NorthNorthwest => write!(f, "North / Northwest"),
            Region::EastWestCorridor => write!(f, "East-West Corridor"),
            Region::EastNortheast => write!(f, "East / Northeast"),
            Region::Central => write!(f, "Central"),
            Region::SouthSouthwest => write!(f, "South / Southwest"),
            Region::Tobago => write!(f, "Tobago"),
        }
    }
}

/// A named place with a fixed coordinate.
pub struct Location {
    pub name: &'static str,
    pub region: Region,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
}

impl Location {
    pub const fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Initial center of the pinpoint map, roughly mid-Trinidad.
pub const MAP_CENTER: Coordinates = Coordinates::new(10.5, -61.3);

const fn loc(name: &'static str, region: Region, latitude: f64, longitude: f64) -> Location {
    Location {
        name,
        region,
        latitude,
        longitude,
    }
}

/// Every selectable town, grouped north to south with Tobago last.
pub static LOCATION_REGISTRY: &[Location] = &[
    // --- North / Northwest ---
    loc("Port of Spain", Region::NorthNorthwest, 10.6667, -61.5167),
    loc("Diego Martin", Region::NorthNorthwest, 10.7167, -61.5667),
    loc("Maraval", Region::NorthNorthwest, 10.6931, -61.5211),
    loc("Santa Cruz", Region::NorthNorthwest, 10.7000, -61.4667),
    loc("San Juan", Region::NorthNorthwest, 10.6455, -61.4489),
    loc("Barataria", Region::NorthNorthwest, 10.6522, -61.4622),
    loc("Carenage", Region::NorthNorthwest, 10.6833, -61.6000),
    loc("Blanchisseuse", Region::NorthNorthwest, 10.7933, -61.3094),
    // --- East-West Corridor ---
    loc("St. Joseph", Region::EastWestCorridor, 10.6333, -61.4167),
    loc("St. Augustine", Region::EastWestCorridor, 10.6414, -61.4000),
    loc("Tunapuna", Region::EastWestCorridor, 10.6500, -61.3833),
    loc("Tacarigua", Region::EastWestCorridor, 10.6400, -61.3700),
    loc("Arouca", Region::EastWestCorridor, 10.6289, -61.3347),
    loc("Piarco", Region::EastWestCorridor, 10.6000, -61.3333),
    loc("Arima", Region::EastWestCorridor, 10.6333, -61.2833),
    loc("D'Abadie", Region::EastWestCorridor, 10.6333, -61.3000),
    // --- East / Northeast ---
    loc("Sangre Grande", Region::EastNortheast, 10.5833, -61.1167),
    loc("Valencia", Region::EastNortheast, 10.6500, -61.2000),
    loc("Toco", Region::EastNortheast, 10.8333, -60.9500),
    loc("Matura", Region::EastNortheast, 10.6667, -61.0667),
    loc("Matelot", Region::EastNortheast, 10.8167, -61.1167),
    loc("Manzanilla", Region::EastNortheast, 10.5167, -61.0500),
    // --- Central ---
    loc("Chaguanas", Region::Central, 10.5167, -61.4000),
    loc("Couva", Region::Central, 10.4167, -61.4500),
    loc("Cunupia", Region::Central, 10.5333, -61.3833),
    loc("Freeport", Region::Central, 10.4500, -61.4167),
    loc("Tabaquite", Region::Central, 10.3833, -61.3000),
    loc("Talparo", Region::Central, 10.4667, -61.2667),
    loc("Montrose", Region::Central, 10.5100, -61.4100),
    // --- South / Southwest ---
    loc("San Fernando", Region::SouthSouthwest, 10.2833, -61.4667),
    loc("Princes Town", Region::SouthSouthwest, 10.2667, -61.3833),
    loc("Debe", Region::SouthSouthwest, 10.2167, -61.4444),
    loc("Penal", Region::SouthSouthwest, 10.1667, -61.4667),
    loc("Siparia", Region::SouthSouthwest, 10.1333, -61.5000),
    loc("Fyzabad", Region::SouthSouthwest, 10.1833, -61.5333),
    loc("Point Fortin", Region::SouthSouthwest, 10.1667, -61.6667),
    loc("La Brea", Region::SouthSouthwest, 10.2500, -61.6167),
    loc("Cedros", Region::SouthSouthwest, 10.0833, -61.8500),
    loc("Guayaguayare", Region::SouthSouthwest, 10.1333, -61.0500),
    loc("Mayaro", Region::SouthSouthwest, 10.3000, -61.0333),
    loc("Rio Claro", Region::SouthSouthwest, 10.3033, -61.1678),
    // --- Tobago ---
    loc("Scarborough (Tobago)", Region::Tobago, 11.1833, -60.7333),
    loc("Roxborough", Region::Tobago, 11.2333, -60.5833),
    loc("Charlotteville", Region::Tobago, 11.3167, -60.5500),
    loc("Speyside", Region::Tobago, 11.3000, -60.5333),
    loc("Canaan", Region::Tobago, 11.1500, -60.8167),
];

/// Looks up a location by exact name. Returns `None` if not found.
pub fn find_location(name: &str) -> Option<&'static Location> {
    LOCATION_REGISTRY.iter().find(|l| l.name == name)
}

/// Resolves a registered name to its coordinates.
pub fn lookup(name: &str) -> Result<Coordinates, LocationError> {
    find_location(name)
        .map(Location::coordinates)
        .ok_or_else(|| LocationError::NotFound(name.to_string()))
}

/// All registered names in ascending byte order, as the pickers list them.
pub fn list_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = LOCATION_REGISTRY.iter().map(|l| l.name).collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// Names in one region, in registry order.
pub fn names_in_region(region: Region) -> Vec<&'static str> {
    LOCATION_REGISTRY
        .iter()
        .filter(|l| l.region == region)
        .map(|l| l.name)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
