//! Incident report storage.
//!
//! Reports are append-only: once written, a row is never rewritten or
//! reordered, and a full read returns rows oldest first. The [`ReportStore`]
//! trait is the seam callers program against:
//!
//! - `csv_file`: the production store, a CSV file guarded by an append lock.
//! - `memory`: an in-process store for tests and callers without a disk.

pub mod csv_file;
pub mod memory;

pub use csv_file::CsvReportStore;
pub use memory::InMemoryReportStore;

use crate::logging::{self, DataSource};
use crate::model::IncidentReport;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when writing or reading the report collection.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The collection could not be opened, read, or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The collection could not be parsed past `line`; no rows after it are
    /// recoverable.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: u64, message: String },
}

// ---------------------------------------------------------------------------
// Scan results
// ---------------------------------------------------------------------------

/// A row that was present in the collection but could not be turned into a
/// report.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    /// 1-based line number in the backing collection.
    pub line: u64,
    pub reason: String,
}

/// Outcome of a full read: every well-formed report in append order, plus a
/// note for each row that was dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanResult {
    pub reports: Vec<IncidentReport>,
    pub skipped: Vec<SkippedRow>,
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Durable, append-only collection of incident reports.
pub trait ReportStore: Send + Sync {
    /// Short identifier used in log lines (a file path, or `"memory"`).
    fn name(&self) -> String;

    /// Creates an empty collection if and only if none exists yet.
    ///
    /// Returns `true` when this call created it. Never touches an existing
    /// collection, even an empty or malformed one.
    fn ensure_initialized(&self) -> Result<bool, StoreError>;

    /// Adds one report after all existing rows.
    fn append(&self, report: &IncidentReport) -> Result<(), StoreError>;

    /// Reads the whole collection, separating good rows from malformed ones.
    ///
    /// A collection that was never written reads as empty.
    fn scan(&self) -> Result<ScanResult, StoreError>;

    /// Every well-formed report, oldest first. Malformed rows are logged and
    /// left out.
    fn read_all(&self) -> Result<Vec<IncidentReport>, StoreError> {
        let scan = self.scan()?;
        let name = self.name();

        for row in &scan.skipped {
            logging::warn(
                DataSource::Store,
                Some(name.as_str()),
                &format!("Skipping line {}: {}", row.line, row.reason),
            );
        }
        logging::log_scan_summary(&name, scan.reports.len(), scan.skipped.len());

        Ok(scan.reports)
    }
}
