//! Shared error types for the buyer-lead intake system

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("invalid value \"{value}\": must be one of {allowed}")]
    InvalidEnumValue { value: String, allowed: String },

    #[error("invalid timestamp: {value}")]
    InvalidTimestamp { value: String },

    #[error("must be an integer: {value}")]
    InvalidNumber { value: String },

    #[error("invalid role: {value}")]
    InvalidRole { value: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
