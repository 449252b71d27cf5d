//! Core data types for the community climate-incident service.
//!
//! This module defines the shared domain model imported by all other modules:
//! coordinates, issue kinds and their map colors, incident reports, and
//! weather readings. It holds no I/O.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Formats and column layout
// ---------------------------------------------------------------------------

/// `strftime` pattern for report timestamps, e.g. `2024-05-01 13:05`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Header row of the report collection, in column order.
pub const REPORT_COLUMNS: [&str; 7] = [
    "Timestamp",
    "Location",
    "Issue",
    "Description",
    "lat",
    "lon",
    "Color",
];

/// Prefix applied to the location label when a map click supplied the position.
pub const GPS_LABEL_PREFIX: &str = "GPS: ";

/// Marker color for `Other` and for any issue label outside the fixed table.
pub const DEFAULT_COLOR: &str = "#808080";

// ---------------------------------------------------------------------------
// Coordinates
// ---------------------------------------------------------------------------

/// A WGS84 latitude/longitude pair, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lon)
    }
}

// ---------------------------------------------------------------------------
// Issue kinds
// ---------------------------------------------------------------------------

/// Hazard categories a resident can report.
///
/// Serialized using the human-readable label, which is also what the report
/// collection stores in its `Issue` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IssueKind {
    #[serde(rename = "Localized Flooding")]
    LocalizedFlooding,
    #[serde(rename = "Excessive Heat")]
    ExcessiveHeat,
    #[serde(rename = "Landslide")]
    Landslide,
    #[serde(rename = "Coastal Erosion")]
    CoastalErosion,
    #[serde(rename = "Other")]
    Other,
}

impl IssueKind {
    /// Every issue kind, in the order the submission form offers them.
    pub const ALL: [IssueKind; 5] = [
        IssueKind::LocalizedFlooding,
        IssueKind::ExcessiveHeat,
        IssueKind::Landslide,
        IssueKind::CoastalErosion,
        IssueKind::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            IssueKind::LocalizedFlooding => "Localized Flooding",
            IssueKind::ExcessiveHeat => "Excessive Heat",
            IssueKind::Landslide => "Landslide",
            IssueKind::CoastalErosion => "Coastal Erosion",
            IssueKind::Other => "Other",
        }
    }

    /// Map marker color for this issue kind.
    pub const fn color(self) -> &'static str {
        match self {
            IssueKind::LocalizedFlooding => "#0000FF",
            IssueKind::ExcessiveHeat => "#FF0000",
            IssueKind::Landslide => "#8B4513",
            IssueKind::CoastalErosion => "#008080",
            IssueKind::Other => DEFAULT_COLOR,
        }
    }

    /// Parses a label exactly as stored. Returns `None` for labels outside
    /// the fixed enumeration, including padded ones.
    pub fn from_label(label: &str) -> Option<IssueKind> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Color lookup by raw label; unmapped labels fall back to [`DEFAULT_COLOR`].
pub fn color_for_label(label: &str) -> &'static str {
    IssueKind::from_label(label)
        .map(IssueKind::color)
        .unwrap_or(DEFAULT_COLOR)
}

// ---------------------------------------------------------------------------
// Incident reports
// ---------------------------------------------------------------------------

/// One resident-submitted hazard report: the unit of persisted state.
///
/// Field order matches [`REPORT_COLUMNS`]; the store serializes and parses
/// rows positionally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentReport {
    pub timestamp: String, // TIMESTAMP_FORMAT, local clock
    pub location_label: String,
    pub issue: IssueKind,
    pub description: String,
    pub lat: f64,
    pub lon: f64,
    pub color: String, // "#RRGGBB"
}

impl IncidentReport {
    /// Builds a report stamped with `submitted_at`, deriving the color from
    /// the issue kind.
    pub fn new(
        submitted_at: NaiveDateTime,
        location_label: impl Into<String>,
        issue: IssueKind,
        description: impl Into<String>,
        position: Coordinates,
    ) -> Self {
        Self {
            timestamp: submitted_at.format(TIMESTAMP_FORMAT).to_string(),
            location_label: location_label.into(),
            issue,
            description: description.into(),
            lat: position.lat,
            lon: position.lon,
            color: issue.color().to_string(),
        }
    }

    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }

    /// True when the location came from a map click rather than the registry.
    pub fn is_gps_pinned(&self) -> bool {
        self.location_label.starts_with(GPS_LABEL_PREFIX)
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Current conditions at a coordinate, as reported by the forecast service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherReading {
    pub temperature_celsius: f64,
    pub windspeed_kmh: f64,
    pub weather_code: i32, // WMO weather interpretation code
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 7, 45)
            .unwrap()
    }

    #[test]
    fn test_issue_colors_match_fixed_table() {
        assert_eq!(IssueKind::LocalizedFlooding.color(), "#0000FF");
        assert_eq!(IssueKind::ExcessiveHeat.color(), "#FF0000");
        assert_eq!(IssueKind::Landslide.color(), "#8B4513");
        assert_eq!(IssueKind::CoastalErosion.color(), "#008080");
        assert_eq!(IssueKind::Other.color(), "#808080");
    }

    #[test]
    fn test_unmapped_label_defaults_to_grey() {
        assert_eq!(color_for_label("Tornado"), DEFAULT_COLOR);
        assert_eq!(color_for_label(""), DEFAULT_COLOR);
        assert_eq!(color_for_label("Landslide"), "#8B4513");
    }

    #[test]
    fn test_labels_parse_back_to_their_kind() {
        for kind in IssueKind::ALL {
            assert_eq!(IssueKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(IssueKind::from_label("localized flooding"), None);
        assert_eq!(IssueKind::from_label("Landslide "), None);
    }

    #[test]
    fn test_colors_are_hex_triplets() {
        for kind in IssueKind::ALL {
            let color = kind.color();
            assert_eq!(color.len(), 7, "{} color should be #RRGGBB", kind);
            assert!(color.starts_with('#'));
            assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn test_new_report_truncates_timestamp_to_minutes_and_derives_color() {
        let report = IncidentReport::new(
            noon(),
            "Couva",
            IssueKind::CoastalErosion,
            "",
            Coordinates::new(10.4167, -61.45),
        );
        assert_eq!(report.timestamp, "2024-05-01 12:07");
        assert_eq!(report.color, "#008080");
        assert_eq!(report.description, "");
        assert!(!report.is_gps_pinned());
    }

    #[test]
    fn test_gps_pinned_detection() {
        let report = IncidentReport::new(
            noon(),
            "GPS: Penal",
            IssueKind::Landslide,
            "road gone",
            Coordinates::new(10.1, -61.2),
        );
        assert!(report.is_gps_pinned());
        assert_eq!(report.position(), Coordinates::new(10.1, -61.2));
    }
}
