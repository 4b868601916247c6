//! Error types for core domain validation.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Core domain error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Fiscal quarter number outside 1..=4
    #[error("invalid fiscal quarter: {0} (must be 1..=4)")]
    InvalidQuarter(u8),

    /// Reporting date does not fall in the stated fiscal quarter
    #[error("fiscal date {date} does not fall in {quarter}")]
    QuarterDateMismatch {
        /// The fiscal reporting date on the record
        date: chrono::NaiveDate,
        /// The fiscal quarter the record claims
        quarter: String,
    },

    /// A field is negative where negativity is nonsensical
    #[error("field {field} must not be negative (got {value})")]
    NegativeField {
        /// Field name
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// Unknown ISO 4217 currency code
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}
