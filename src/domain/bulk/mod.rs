//! Bulk-upload domain - CSV row types and row-level validation.
//!
//! Uploads are all-or-nothing: every row is validated first, all errors
//! are collected with their line numbers, and any error fails the whole
//! batch before anything is persisted.

mod rows;

pub use rows::{GroupUploadRow, UserUploadRow};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single validation failure tied to a CSV line.
///
/// Line numbers are 1-based and count the header, matching what a user
/// sees in their spreadsheet tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based line number in the uploaded file.
    pub line: usize,

    /// What is wrong with the row.
    pub message: String,
}

impl RowError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// Errors produced by a bulk upload.
#[derive(Debug, Clone, Error)]
pub enum BulkError {
    /// The header is missing required columns; lists the missing names.
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// The file could not be parsed as CSV at all.
    #[error("Malformed CSV: {0}")]
    Malformed(String),

    /// One or more rows failed validation; the whole batch is rejected.
    #[error("{} row(s) failed validation", .0.len())]
    Rows(Vec<RowError>),
}
