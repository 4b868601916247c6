//! Engine error types.

use thiserror::Error;

use folio_core::types::CompanyId;
use folio_traits::TraitError;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type.
///
/// Data-quality conditions (missing prior quarter, zero denominator) are
/// never represented here: they become `None` metric fields. Only true
/// failures carry an error.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or out-of-policy input record. Permanent; not retried.
    #[error("validation failed: {0}")]
    Validation(#[from] folio_core::CoreError),

    /// FX rate could not be obtained after retries. The unit fails whole;
    /// resubmission later may succeed.
    #[error("rate unavailable: {0}")]
    RateUnavailable(String),

    /// A looked-up rate violated the rate contract (non-positive).
    /// Configuration error; fatal for the record, not retried.
    #[error("invalid rate {rate} for {pair}")]
    InvalidRate {
        /// Currency pair, e.g. "EUR->USD".
        pair: String,
        /// The offending rate value.
        rate: rust_decimal::Decimal,
    },

    /// History or result store transiently unreachable after retries.
    #[error("accessor unavailable: {0}")]
    AccessorUnavailable(String),

    /// No company profile on record for the submitting company.
    #[error("unknown company: {0}")]
    UnknownCompany(CompanyId),

    /// No stored input for the requested company-quarter (recompute only).
    #[error("no stored input: {0}")]
    NoStoredInput(String),

    /// Could not acquire the per-company serialization lock in time.
    /// Concurrent work for the same company queues FIFO; hitting the bound
    /// means the queue is not draining.
    #[error("per-company lock timed out after {0:?}")]
    LockTimeout(std::time::Duration),

    /// Unit was cancelled before conversion started.
    #[error("cancelled before converting")]
    Cancelled,

    /// Publish failed permanently.
    #[error("storage error: {0}")]
    Storage(String),

    /// Engine misconfiguration.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<TraitError> for EngineError {
    fn from(e: TraitError) -> Self {
        match e {
            TraitError::RateUnavailable(msg) => EngineError::RateUnavailable(msg),
            TraitError::Unavailable(msg) => EngineError::AccessorUnavailable(msg),
            TraitError::Timeout => EngineError::AccessorUnavailable("timeout".to_string()),
            TraitError::Conflict(msg) => EngineError::Storage(msg),
            TraitError::NotFound(msg) => EngineError::NoStoredInput(msg),
            TraitError::ParseError(msg) | TraitError::Internal(msg) => EngineError::Internal(msg),
        }
    }
}

impl EngineError {
    /// True for transient failures the orchestrator retries with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            EngineError::RateUnavailable(_) | EngineError::AccessorUnavailable(_)
        )
    }
}

/// Phase a transformation unit was in when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UnitPhase {
    /// Triggering event accepted, unit not yet started.
    Received,
    /// Converting the input into all target currencies.
    Converting,
    /// Computing derived metrics from history.
    Aggregating,
    /// Writing the published rows.
    Publishing,
}

/// A failed transformation unit: the phase it failed in plus the cause.
///
/// Callers use the phase to distinguish "your input was invalid" (Received /
/// Converting with a validation cause) from "retry later" (rate or store
/// unavailability).
#[derive(Debug, Error)]
#[error("transformation failed during {phase:?}: {source}")]
pub struct TransformationError {
    /// Phase the unit was in.
    pub phase: UnitPhase,
    /// Underlying cause.
    #[source]
    pub source: EngineError,
}

impl TransformationError {
    /// Wrap an engine error with the phase it occurred in.
    pub fn new(phase: UnitPhase, source: EngineError) -> Self {
        Self { phase, source }
    }

    /// True when resubmitting the same unit later may succeed.
    pub fn is_retryable(&self) -> bool {
        self.source.is_retryable()
    }
}
