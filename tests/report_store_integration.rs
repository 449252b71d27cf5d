/// Integration tests for the CSV report store.
///
/// These tests verify, against a real file in a temporary directory:
/// 1. Reports read back exactly once, in append order
/// 2. ensure_initialized is idempotent and never clobbers existing data
/// 3. Zero-byte, header-only, and newline-less files are handled
/// 4. Malformed rows are skipped and reported rather than failing the read
/// 5. Concurrent appends never interleave rows
/// 6. Unreadable or unwritable storage surfaces as StoreError::Io
///
/// Run with: cargo test --test report_store_integration

use climate_service::dashboard::{self, DashboardError, SubmissionForm};
use climate_service::model::{Coordinates, IncidentReport, IssueKind};
use climate_service::store::{CsvReportStore, ReportStore, StoreError};

use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

const HEADER: &str = "Timestamp,Location,Issue,Description,lat,lon,Color\n";

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn temp_store() -> (TempDir, CsvReportStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = CsvReportStore::new(dir.path().join("community_reports.csv"));
    (dir, store)
}

fn at(minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
        .unwrap()
        .and_hms_opt(8, minute, 0)
        .unwrap()
}

fn report(minute: u32, location: &str, issue: IssueKind, description: &str) -> IncidentReport {
    IncidentReport::new(
        at(minute),
        location,
        issue,
        description,
        Coordinates::new(10.5 + f64::from(minute) / 100.0, -61.3),
    )
}

// ---------------------------------------------------------------------------
// Append / read
// ---------------------------------------------------------------------------

#[test]
fn test_fresh_store_reads_empty_and_creates_header() {
    let (_dir, store) = temp_store();

    assert!(store.read_all().unwrap().is_empty(), "never-written store should read empty");
    assert!(store.ensure_initialized().unwrap(), "first init should create the file");

    let contents = fs::read_to_string(store.path()).unwrap();
    assert_eq!(contents, HEADER);
    assert!(store.read_all().unwrap().is_empty());
}

#[test]
fn test_reports_read_back_in_append_order() {
    let (_dir, store) = temp_store();
    store.ensure_initialized().unwrap();

    let written = vec![
        report(1, "Toco", IssueKind::CoastalErosion, "beach road undercut"),
        report(2, "GPS: Penal", IssueKind::Landslide, ""),
        report(3, "Arima", IssueKind::ExcessiveHeat, "Crops dying, no shade"),
        report(4, "Couva", IssueKind::Other, "quote \"here\" and\nnewline"),
    ];
    for r in &written {
        store.append(r).unwrap();
    }

    assert_eq!(store.read_all().unwrap(), written);
}

#[test]
fn test_append_then_read_contains_report_exactly_once() {
    let (_dir, store) = temp_store();
    store.ensure_initialized().unwrap();
    store.append(&report(1, "Debe", IssueKind::Other, "first")).unwrap();

    let new = report(2, "Debe", IssueKind::LocalizedFlooding, "second");
    store.append(&new).unwrap();

    let all = store.read_all().unwrap();
    assert_eq!(all.iter().filter(|r| **r == new).count(), 1);
    assert_eq!(all.len(), 2);
}

#[test]
fn test_file_layout_matches_documented_format() {
    let (_dir, store) = temp_store();
    store.ensure_initialized().unwrap();
    store
        .append(&IncidentReport::new(
            at(5),
            "San Fernando",
            IssueKind::LocalizedFlooding,
            "Street is underwater",
            Coordinates::new(10.2833, -61.4667),
        ))
        .unwrap();

    let contents = fs::read_to_string(store.path()).unwrap();
    assert_eq!(
        contents,
        format!(
            "{}2024-05-01 08:05,San Fernando,Localized Flooding,Street is underwater,10.2833,-61.4667,#0000FF\n",
            HEADER
        )
    );
}

// ---------------------------------------------------------------------------
// Initialization
// ---------------------------------------------------------------------------

#[test]
fn test_ensure_initialized_twice_keeps_rows() {
    let (_dir, store) = temp_store();
    store.ensure_initialized().unwrap();
    store.append(&report(1, "Matura", IssueKind::Other, "")).unwrap();
    let before = fs::read(store.path()).unwrap();

    assert!(!store.ensure_initialized().unwrap());
    assert!(!store.ensure_initialized().unwrap());

    assert_eq!(fs::read(store.path()).unwrap(), before);
    assert_eq!(store.read_all().unwrap().len(), 1);
}

#[test]
fn test_ensure_initialized_leaves_malformed_file_alone() {
    let (_dir, store) = temp_store();
    fs::write(store.path(), "this is not a report file").unwrap();

    assert!(!store.ensure_initialized().unwrap());
    assert_eq!(
        fs::read_to_string(store.path()).unwrap(),
        "this is not a report file"
    );
}

#[test]
fn test_ensure_initialized_creates_missing_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvReportStore::new(dir.path().join("data").join("reports.csv"));
    assert!(store.ensure_initialized().unwrap());
    assert!(store.path().exists());
}

// ---------------------------------------------------------------------------
// Degenerate files
// ---------------------------------------------------------------------------

#[test]
fn test_zero_byte_file_reads_empty_and_first_append_adds_header() {
    let (_dir, store) = temp_store();
    fs::write(store.path(), "").unwrap();

    assert!(!store.ensure_initialized().unwrap(), "existing empty file must not be replaced");
    assert!(store.read_all().unwrap().is_empty());

    let r = report(1, "Cedros", IssueKind::CoastalErosion, "");
    store.append(&r).unwrap();

    assert!(fs::read_to_string(store.path()).unwrap().starts_with(HEADER));
    assert_eq!(store.read_all().unwrap(), vec![r]);
}

#[test]
fn test_header_without_trailing_newline_reads_empty_and_appends_cleanly() {
    let (_dir, store) = temp_store();
    fs::write(store.path(), HEADER.trim_end()).unwrap();

    assert!(store.read_all().unwrap().is_empty());

    let r = report(2, "Siparia", IssueKind::LocalizedFlooding, "drain overflow");
    store.append(&r).unwrap();

    let contents = fs::read_to_string(store.path()).unwrap();
    assert_eq!(contents.lines().count(), 2, "row must not fuse onto the header line");
    assert_eq!(store.read_all().unwrap(), vec![r]);
}

// ---------------------------------------------------------------------------
// Malformed rows
// ---------------------------------------------------------------------------

#[test]
fn test_malformed_rows_are_skipped_and_reported() {
    let (_dir, store) = temp_store();
    let good = report(1, "Fyzabad", IssueKind::ExcessiveHeat, "");
    store.append(&good).unwrap();

    // Simulate a truncated write and a hand-edited row.
    let mut contents = fs::read_to_string(store.path()).unwrap();
    contents.push_str("2024-05-01 08:02,Fyzabad,Excess\n");
    contents.push_str("2024-05-01 08:03,Fyzabad,Excessive Heat,,ten,-61.5,#FF0000\n");
    fs::write(store.path(), contents).unwrap();

    let later = report(4, "Fyzabad", IssueKind::Other, "after the damage");
    store.append(&later).unwrap();

    let scan = store.scan().unwrap();
    assert_eq!(scan.reports, vec![good.clone(), later.clone()]);
    assert_eq!(scan.skipped.len(), 2);
    assert_eq!(scan.skipped[0].line, 3);
    assert_eq!(scan.skipped[1].line, 4);

    assert_eq!(store.read_all().unwrap(), vec![good, later]);
}

#[test]
fn test_invalid_utf8_row_is_skipped() {
    let (_dir, store) = temp_store();
    let good = report(1, "Valencia", IssueKind::Landslide, "");
    store.append(&good).unwrap();

    let mut bytes = fs::read(store.path()).unwrap();
    bytes.extend_from_slice(b"2024-05-01 08:02,Val\xff\xfe,Other,,10.6,-61.2,#808080\n");
    fs::write(store.path(), bytes).unwrap();

    let scan = store.scan().unwrap();
    assert_eq!(scan.reports, vec![good]);
    assert_eq!(scan.skipped.len(), 1);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn test_concurrent_appends_do_not_interleave() {
    let (_dir, store) = temp_store();
    store.ensure_initialized().unwrap();
    let store = Arc::new(store);

    let long_description = "x".repeat(4096);
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            let description = format!("thread {} {}", t, long_description);
            thread::spawn(move || {
                for i in 0..25 {
                    let r = report(i, "Piarco", IssueKind::Other, &description);
                    store.append(&r).expect("append should succeed");
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let scan = store.scan().unwrap();
    assert!(scan.skipped.is_empty(), "no row should be corrupted: {:?}", scan.skipped);
    assert_eq!(scan.reports.len(), 200);
}

// ---------------------------------------------------------------------------
// Storage failures
// ---------------------------------------------------------------------------

#[test]
fn test_append_to_unwritable_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvReportStore::new(dir.path());

    let result = store.append(&report(1, "Arima", IssueKind::Other, ""));
    assert!(matches!(result, Err(StoreError::Io { .. })), "got {:?}", result);
}

#[test]
fn test_read_of_unreadable_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvReportStore::new(dir.path());

    let result = store.read_all();
    assert!(matches!(result, Err(StoreError::Io { .. })), "got {:?}", result);
}

#[test]
fn test_submission_surfaces_store_failure() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvReportStore::new(dir.path());

    let form = SubmissionForm {
        location: "Chaguanas".to_string(),
        issue: IssueKind::LocalizedFlooding,
        description: String::new(),
        clicked: None,
    };
    let result = dashboard::submit_report_at(&store, &form, at(5));
    assert!(
        matches!(result, Err(DashboardError::Store(StoreError::Io { .. }))),
        "got {:?}",
        result
    );
}

// ---------------------------------------------------------------------------
// Dashboard flows against the file store
// ---------------------------------------------------------------------------

#[test]
fn test_submission_persists_gps_label_and_click_coordinates() {
    let (_dir, store) = temp_store();
    store.ensure_initialized().unwrap();

    let form = SubmissionForm {
        location: "Penal".to_string(),
        issue: IssueKind::LocalizedFlooding,
        description: "Water over the bridge".to_string(),
        clicked: Some(Coordinates::new(10.1, -61.2)),
    };
    dashboard::submit_report_at(&store, &form, at(30)).unwrap();

    let all = store.read_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].location_label, "GPS: Penal");
    assert_eq!((all[0].lat, all[0].lon), (10.1, -61.2));
    assert_eq!(all[0].color, "#0000FF");
}

#[test]
fn test_feed_over_three_reports_lists_all_newest_first() {
    let (_dir, store) = temp_store();
    store.ensure_initialized().unwrap();
    for (minute, town) in [(1, "Tunapuna"), (2, "Arouca"), (3, "Tacarigua")] {
        let form = SubmissionForm {
            location: town.to_string(),
            issue: IssueKind::LocalizedFlooding,
            description: String::new(),
            clicked: None,
        };
        dashboard::submit_report_at(&store, &form, at(minute)).unwrap();
    }

    let feed = dashboard::live_feed(&store, 10).unwrap();
    let towns: Vec<&str> = feed.recent.iter().map(|r| r.location_label.as_str()).collect();
    assert_eq!(towns, vec!["Tacarigua", "Arouca", "Tunapuna"]);
    assert_eq!(feed.markers.len(), 3);
}
