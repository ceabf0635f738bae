//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from mapping-service and planning errors.

use chrono::NaiveDate;

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A date string did not match any accepted format
    #[error("unrecognized date format: {0:?}")]
    UnrecognizedDate(String),

    /// Trip window is empty or reversed
    #[error("start date {start} must be before end date {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
}
