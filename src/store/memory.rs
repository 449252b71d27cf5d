//! In-process report store.
//!
//! Behaves like the CSV store minus the disk: useful for tests of the
//! dashboard flows and for running without a writable working directory.

use super::{ReportStore, ScanResult, StoreError};
use crate::model::IncidentReport;
use std::sync::{Mutex, MutexGuard};

/// `None` until the collection is initialized or first appended to.
#[derive(Default)]
pub struct InMemoryReportStore {
    rows: Mutex<Option<Vec<IncidentReport>>>,
}

impl InMemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `reports`, oldest first.
    pub fn with_reports(reports: Vec<IncidentReport>) -> Self {
        Self {
            rows: Mutex::new(Some(reports)),
        }
    }

    pub fn len(&self) -> usize {
        self.rows().as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rows(&self) -> MutexGuard<'_, Option<Vec<IncidentReport>>> {
        self.rows.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ReportStore for InMemoryReportStore {
    fn name(&self) -> String {
        "memory".to_string()
    }

    fn ensure_initialized(&self) -> Result<bool, StoreError> {
        let mut rows = self.rows();
        if rows.is_some() {
            return Ok(false);
        }
        *rows = Some(Vec::new());
        Ok(true)
    }

    fn append(&self, report: &IncidentReport) -> Result<(), StoreError> {
        self.rows()
            .get_or_insert_with(Vec::new)
            .push(report.clone());
        Ok(())
    }

    fn scan(&self) -> Result<ScanResult, StoreError> {
        Ok(ScanResult {
            reports: self.rows().clone().unwrap_or_default(),
            skipped: Vec::new(),
        })
    }
}
