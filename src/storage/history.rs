//! Append-only calculation history
//!
//! The log is a CSV file with a fixed 8-column header followed by one row per
//! completed calculation. Rows are never rewritten or reordered.
//!
//! Every append and every scan holds the store's lock for the whole
//! open/write/flush sequence, and writes go through an append-mode handle,
//! so sessions finishing at the same time cannot interleave or lose rows.
//! The lock is per process; two processes sharing one log are not
//! coordinated.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info};

use crate::error::{AdvisorError, AdvisorResult};
use crate::models::{HistoryRecord, HISTORY_HEADER};

/// Outcome of a history lookup
#[derive(Debug, Clone, PartialEq)]
pub enum HistoryLookup {
    /// No calculation has ever been logged
    NoLog,
    /// Matching rows in append order; may be empty
    Records(Vec<HistoryRecord>),
}

impl HistoryLookup {
    /// Number of matching rows
    pub fn len(&self) -> usize {
        match self {
            HistoryLookup::NoLog => 0,
            HistoryLookup::Records(records) => records.len(),
        }
    }

    /// Whether the lookup produced no rows at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The matching records (empty when there is no log)
    pub fn into_records(self) -> Vec<HistoryRecord> {
        match self {
            HistoryLookup::NoLog => Vec::new(),
            HistoryLookup::Records(records) => records,
        }
    }
}

/// Owner of the shared history log file
pub struct HistoryStore {
    /// Path to the log file
    log_path: PathBuf,
    /// Serialises all access to the file
    lock: Mutex<()>,
}

impl HistoryStore {
    /// Create a store that reads and writes the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path,
            lock: Mutex::new(()),
        }
    }

    /// Append one record, writing the header first if the log is new
    pub fn append(&self, record: &HistoryRecord) -> AdvisorResult<()> {
        let _guard = self.acquire()?;

        if let Some(parent) = self.log_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AdvisorError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| AdvisorError::Storage(format!("Failed to open history log: {}", e)))?;

        let is_new = file
            .metadata()
            .map_err(|e| AdvisorError::Storage(format!("Failed to stat history log: {}", e)))?
            .len()
            == 0;

        // Buffer the whole row so it reaches the file in one write
        let mut buffer = Vec::new();
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut buffer);
            if is_new {
                writer.write_record(HISTORY_HEADER)?;
            }
            writer.write_record(record.to_fields())?;
            writer.flush()?;
        }

        file.write_all(&buffer)
            .map_err(|e| AdvisorError::Storage(format!("Failed to write history row: {}", e)))?;
        file.flush()
            .map_err(|e| AdvisorError::Storage(format!("Failed to flush history log: {}", e)))?;

        info!(
            user = %record.user_display_name,
            months = record.months,
            new_log = is_new,
            "Appended history record"
        );
        Ok(())
    }

    /// Read the records of one user, matched exactly on the display name
    pub fn query_by_user(&self, user_display_name: &str) -> AdvisorResult<HistoryLookup> {
        let _guard = self.acquire()?;
        let lookup = self.scan(|record| record.user_display_name == user_display_name)?;

        debug!(
            user = %user_display_name,
            found = lookup.len(),
            "Queried history"
        );
        Ok(lookup)
    }

    /// Check if the history log file exists
    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    /// Get the path to the history log file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }

    fn acquire(&self) -> AdvisorResult<MutexGuard<'_, ()>> {
        self.lock
            .lock()
            .map_err(|_| AdvisorError::Storage("History lock poisoned".into()))
    }

    fn scan(&self, keep: impl Fn(&HistoryRecord) -> bool) -> AdvisorResult<HistoryLookup> {
        if !self.log_path.exists() {
            return Ok(HistoryLookup::NoLog);
        }

        let file = File::open(&self.log_path)
            .map_err(|e| AdvisorError::Storage(format!("Failed to open history log: {}", e)))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);

        let mut records = Vec::new();
        for (line_num, row) in reader.records().enumerate() {
            let row = row.map_err(|e| {
                AdvisorError::Storage(format!(
                    "Failed to read history row {}: {}",
                    line_num + 2,
                    e
                ))
            })?;

            let record = HistoryRecord::from_record(&row)?;
            if keep(&record) {
                records.push(record);
            }
        }

        Ok(HistoryLookup::Records(records))
    }
}
