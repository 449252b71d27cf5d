//! Derived views for the live map and the recent-updates feed.

use crate::model::{Coordinates, IncidentReport, IssueKind};
use std::collections::BTreeMap;

/// Number of rows the recent-updates table shows.
pub const DEFAULT_FEED_LIMIT: usize = 10;

/// One pin on the community map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub position: Coordinates,
    pub color: String,
    pub issue: IssueKind,
}

/// The last `n` reports, most recent first.
///
/// Returns every report when fewer than `n` exist.
pub fn most_recent(reports: &[IncidentReport], n: usize) -> Vec<&IncidentReport> {
    reports.iter().rev().take(n).collect()
}

/// One marker per report, in collection order.
pub fn map_markers(reports: &[IncidentReport]) -> Vec<MapMarker> {
    reports
        .iter()
        .map(|r| MapMarker {
            position: r.position(),
            color: r.color.clone(),
            issue: r.issue,
        })
        .collect()
}

/// How many reports exist for each issue kind. Kinds with no reports are
/// left out.
pub fn issue_counts(reports: &[IncidentReport]) -> BTreeMap<IssueKind, usize> {
    let mut counts = BTreeMap::new();
    for report in reports {
        *counts.entry(report.issue).or_insert(0) += 1;
    }
    counts
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
