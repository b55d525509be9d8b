//! Scan history — one CSV file per calendar day.
//!
//! Files are named `YYYY-MM-DD_Weekday.csv` and keyed by scan date. Writes
//! are append-or-create: the first write of a day creates the file with a
//! header row, later same-day writes append rows, and nothing is ever
//! truncated or overwritten. Lexicographic name order is date order.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

/// Errors from the history store.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("history CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Per-day CSV store for scan results.
pub struct HistoryStore {
    dir: PathBuf,
}

impl HistoryStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// File name for a scan date, e.g. `2026-08-06_Thursday.csv`.
    pub fn file_name(date: NaiveDate) -> String {
        format!("{}.csv", date.format("%Y-%m-%d_%A"))
    }

    /// Full path of the file for a scan date.
    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dir.join(Self::file_name(date))
    }

    /// Append rows under the given scan date, creating the file (with a
    /// header row) on the first write of that date.
    pub fn append<T: Serialize>(
        &self,
        date: NaiveDate,
        rows: &[T],
    ) -> Result<PathBuf, HistoryError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(date);
        let write_header = !path.exists();

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;

        Ok(path)
    }

    /// List saved scan files, sorted by name (and therefore by date).
    pub fn list(&self) -> Result<Vec<String>, HistoryError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut names: Vec<String> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".csv"))
            .collect();
        names.sort();
        Ok(names)
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
