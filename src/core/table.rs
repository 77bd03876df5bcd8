//! Shared validation for the delimited input tables.
//!
//! Both loaders go through [`read_table`], so "file missing", "no rows" and
//! "cannot be parsed" are reported the same way regardless of which artifact
//! is being read.

use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Failures raised while validating an input table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The file does not exist.
    #[error("input not found at '{}'", .0.display())]
    MissingInput(PathBuf),

    /// The file parsed but holds no data rows.
    #[error("'{}' contains no data rows", .0.display())]
    EmptyData(PathBuf),

    /// The file could not be parsed, or lacks a required column.
    #[error("malformed table '{}': {reason}", .path.display())]
    MalformedData { path: PathBuf, reason: String },
}

impl TableError {
    pub fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        TableError::MalformedData {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// A validated, non-empty table.
#[derive(Debug, Clone)]
pub struct Table {
    path: PathBuf,
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Table {
    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// Index of the column whose header is exactly `name`.
    pub fn column(&self, name: &str) -> Result<usize, TableError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::malformed(&self.path, format!("missing column '{name}'")))
    }
}

/// Reads a headed CSV file, keeping at most `max_rows` data records.
///
/// Records past the limit are never parsed.
pub fn read_table(path: &Path, max_rows: Option<usize>) -> Result<Table, TableError> {
    if !path.exists() {
        return Err(TableError::MissingInput(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| TableError::malformed(path, e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| TableError::malformed(path, e.to_string()))?
        .clone();

    let limit = max_rows.unwrap_or(usize::MAX);
    let mut rows = Vec::new();
    for record in reader.records().take(limit) {
        let record = record.map_err(|e| TableError::malformed(path, e.to_string()))?;
        rows.push(record);
    }

    if rows.is_empty() {
        return Err(TableError::EmptyData(path.to_path_buf()));
    }

    debug!(path = %path.display(), rows = rows.len(), "Read table");
    Ok(Table {
        path: path.to_path_buf(),
        headers,
        rows,
    })
}
