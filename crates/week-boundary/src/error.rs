//! Error types for week-boundary operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeekError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    /// The rule source could not resolve offsets for a wall-clock value.
    #[error("Zone rules error: {0}")]
    ZoneRules(String),

    #[error("Datetime out of range: {0}")]
    OutOfRange(String),
}

pub type Result<T> = std::result::Result<T, WeekError>;
