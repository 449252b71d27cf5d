//! The three dashboard flows, minus any widgets.
//!
//! A front end collects the user's input (selected town, form fields, a map
//! click) and hands it to these functions, which talk to the registry, the
//! report store, and the weather source. Rendering is left to the caller.
//!
//! # Clock injection
//! Submission stamps reports with the local clock. `submit_report_at` and
//! `build_report_at` take `now` explicitly so tests stay deterministic.

use crate::alert::thresholds::{check_heat, HeatAlert};
use crate::analysis::feed::{self, MapMarker};
use crate::ingest::open_meteo::WeatherSource;
use crate::locations::{self, LocationError};
use crate::logging::{self, DataSource};
use crate::model::{Coordinates, IncidentReport, IssueKind, WeatherReading, GPS_LABEL_PREFIX};
use crate::store::{ReportStore, StoreError};
use chrono::{Local, NaiveDateTime};
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

// ---------------------------------------------------------------------------
// Live map & feed
// ---------------------------------------------------------------------------

/// Everything the live map page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveFeed {
    pub markers: Vec<MapMarker>,
    /// Newest first, at most the requested limit.
    pub recent: Vec<IncidentReport>,
    pub counts: BTreeMap<IssueKind, usize>,
    pub total: usize,
}

impl LiveFeed {
    /// No reports yet; the page invites the first one instead of a map.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Reads the full collection and derives the map and recent-updates views.
pub fn live_feed(store: &dyn ReportStore, limit: usize) -> Result<LiveFeed, StoreError> {
    let reports = store.read_all()?;

    Ok(LiveFeed {
        markers: feed::map_markers(&reports),
        recent: feed::most_recent(&reports, limit)
            .into_iter()
            .cloned()
            .collect(),
        counts: feed::issue_counts(&reports),
        total: reports.len(),
    })
}

// ---------------------------------------------------------------------------
// Report submission
// ---------------------------------------------------------------------------

/// What the report form hands over on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionForm {
    /// A name from the location registry.
    pub location: String,
    pub issue: IssueKind,
    pub description: String,
    /// Set when the user clicked the map before submitting.
    pub clicked: Option<Coordinates>,
}

/// Turns a submitted form into a report stamped `now`.
///
/// A captured map click wins over the registry coordinate and marks the
/// label with `GPS: `. The location name must be registered either way.
pub fn build_report_at(
    form: &SubmissionForm,
    now: NaiveDateTime,
) -> Result<IncidentReport, LocationError> {
    let registered = locations::lookup(&form.location)?;

    let (label, position) = match form.clicked {
        Some(click) => (format!("{}{}", GPS_LABEL_PREFIX, form.location), click),
        None => (form.location.clone(), registered),
    };

    Ok(IncidentReport::new(
        now,
        label,
        form.issue,
        form.description.clone(),
        position,
    ))
}

/// Builds and persists a report stamped `now`, returning what was written.
pub fn submit_report_at(
    store: &dyn ReportStore,
    form: &SubmissionForm,
    now: NaiveDateTime,
) -> Result<IncidentReport, DashboardError> {
    let report = build_report_at(form, now)?;
    store.append(&report)?;

    logging::info(
        DataSource::Store,
        Some(report.location_label.as_str()),
        &format!("Report submitted: {}", report.issue),
    );
    Ok(report)
}

/// [`submit_report_at`] using the local clock.
pub fn submit_report(
    store: &dyn ReportStore,
    form: &SubmissionForm,
) -> Result<IncidentReport, DashboardError> {
    submit_report_at(store, form, Local::now().naive_local())
}

// ---------------------------------------------------------------------------
// Weather station
// ---------------------------------------------------------------------------

/// What the weather station page shows for one town.
#[derive(Debug, Clone, PartialEq)]
pub enum StationView {
    Available {
        location: String,
        reading: WeatherReading,
        alert: Option<HeatAlert>,
    },
    /// The lookup failed for any reason; the page says data is unavailable.
    Unavailable { location: String },
}

/// Looks up current conditions for a registered town.
pub fn weather_station(
    source: &dyn WeatherSource,
    location: &str,
) -> Result<StationView, LocationError> {
    let coords = locations::lookup(location)?;

    let view = match source.fetch_current(coords) {
        Some(reading) => {
            let alert = check_heat(&reading, location);
            if let Some(a) = &alert {
                logging::warn(DataSource::OpenMeteo, Some(location), &a.message);
            }
            StationView::Available {
                location: location.to_string(),
                reading,
                alert,
            }
        }
        None => StationView::Unavailable {
            location: location.to_string(),
        },
    };

    Ok(view)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
