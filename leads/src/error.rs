//! Lead write-path error types
//!
//! Every variant here is an expected, recoverable-by-caller condition and
//! maps one-to-one onto an HTTP status in the webserver crate. None of
//! them are retried internally; the caller decides whether to refetch,
//! correct, or back off.

use serde::Serialize;
use thiserror::Error;

/// One violated rule, tagged with the wire name of the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// One rejected import row. Row numbers are 1-based and include the CSV
/// header, so the first data row reports as row 2.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum LeadError {
    #[error("authentication required")]
    Unauthorized,

    #[error("not allowed to modify this lead")]
    Forbidden,

    #[error("lead not found: {id}")]
    NotFound { id: String },

    #[error("record changed, please refresh")]
    Conflict,

    #[error("invalid input: {} field error(s)", .errors.len())]
    ValidationFailed { errors: Vec<FieldError> },

    #[error("rate limited: {key}")]
    RateLimited { key: String },

    #[error("batch too large: {rows} rows (max {max})")]
    BatchTooLarge { rows: usize, max: usize },

    #[error("import rejected: {} row error(s)", .errors.len())]
    ImportRejected { errors: Vec<RowError> },

    #[error("malformed CSV: {message}")]
    InvalidCsv { message: String },

    #[error("store operation failed: {message}")]
    Store { message: String },
}

pub type LeadResult<T> = Result<T, LeadError>;
