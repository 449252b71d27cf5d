//! CSV-backed report store.
//!
//! The collection is a comma-separated file with a fixed seven-column header:
//!
//! ```text
//! Timestamp,Location,Issue,Description,lat,lon,Color
//! ```
//!
//! Rows are read positionally in that column order. Appends within a process
//! are serialized behind a mutex, and each row goes to disk as a single
//! `write_all` on a handle opened in append mode, so concurrent writers never
//! interleave partial rows.

use super::{ReportStore, ScanResult, SkippedRow, StoreError};
use crate::logging::{self, DataSource};
use crate::model::{IncidentReport, REPORT_COLUMNS};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub struct CsvReportStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvReportStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The guarded value is `()`, so a poisoned lock carries no broken state.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn ensure_parent_dir(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|e| self.io_error(e))
            }
            _ => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Row encoding
// ---------------------------------------------------------------------------

fn encode_header() -> io::Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(REPORT_COLUMNS)?;
    writer.into_inner().map_err(|e| e.into_error())
}

fn encode_row(report: &IncidentReport) -> io::Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.serialize(report)?;
    writer.into_inner().map_err(|e| e.into_error())
}

/// True if the last byte of a non-empty file is a newline.
fn ends_with_newline(file: &mut File, len: u64) -> io::Result<bool> {
    if len == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::Start(len - 1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

fn is_header(record: &csv::StringRecord) -> bool {
    record.len() == REPORT_COLUMNS.len()
        && record
            .iter()
            .zip(REPORT_COLUMNS)
            .all(|(field, column)| field.trim() == column)
}

/// Parses every row after an optional header line.
fn parse_rows<R: Read>(reader: R) -> Result<ScanResult, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut result = ScanResult::default();
    let mut first = true;

    for record in csv_reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => match e.kind() {
                csv::ErrorKind::Utf8 { pos, err } => {
                    result.skipped.push(SkippedRow {
                        line: pos.as_ref().map(|p| p.line()).unwrap_or(0),
                        reason: format!("invalid UTF-8: {}", err),
                    });
                    first = false;
                    continue;
                }
                _ => return Err(e),
            },
        };

        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if first {
            first = false;
            if is_header(&record) {
                continue;
            }
        }

        if record.len() != REPORT_COLUMNS.len() {
            result.skipped.push(SkippedRow {
                line,
                reason: format!(
                    "expected {} fields, found {}",
                    REPORT_COLUMNS.len(),
                    record.len()
                ),
            });
            continue;
        }

        match record.deserialize::<IncidentReport>(None) {
            Ok(report) => result.reports.push(report),
            Err(e) => result.skipped.push(SkippedRow {
                line,
                reason: e.to_string(),
            }),
        }
    }

    Ok(result)
}

// ---------------------------------------------------------------------------
// Store implementation
// ---------------------------------------------------------------------------

impl ReportStore for CsvReportStore {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn ensure_initialized(&self) -> Result<bool, StoreError> {
        let _guard = self.guard();
        self.ensure_parent_dir()?;

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(self.io_error(e)),
        };

        let header = encode_header().map_err(|e| self.io_error(e))?;
        file.write_all(&header).map_err(|e| self.io_error(e))?;
        file.flush().map_err(|e| self.io_error(e))?;

        logging::info(
            DataSource::Store,
            Some(self.name().as_str()),
            "Created empty report collection",
        );
        Ok(true)
    }

    fn append(&self, report: &IncidentReport) -> Result<(), StoreError> {
        let _guard = self.guard();
        self.ensure_parent_dir()?;

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        let len = file.metadata().map_err(|e| self.io_error(e))?.len();

        // Assemble the whole write up front so it lands in one call.
        let mut buf = Vec::new();
        if len == 0 {
            // A zero-byte collection would otherwise read this row as its header.
            buf.extend(encode_header().map_err(|e| self.io_error(e))?);
        } else if !ends_with_newline(&mut file, len).map_err(|e| self.io_error(e))? {
            buf.push(b'\n');
        }
        buf.extend(encode_row(report).map_err(|e| self.io_error(e))?);

        file.write_all(&buf).map_err(|e| self.io_error(e))?;
        file.flush().map_err(|e| self.io_error(e))?;

        logging::debug(
            DataSource::Store,
            Some(self.name().as_str()),
            &format!("Appended {} report at {}", report.issue, report.location_label),
        );
        Ok(())
    }

    fn scan(&self) -> Result<ScanResult, StoreError> {
        let _guard = self.guard();

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ScanResult::default()),
            Err(e) => return Err(self.io_error(e)),
        };

        parse_rows(file).map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            match e.into_kind() {
                csv::ErrorKind::Io(source) => self.io_error(source),
                other => StoreError::Parse {
                    line,
                    message: format!("{:?}", other),
                },
            }
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
