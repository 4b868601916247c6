//! Error types for trait operations.

use thiserror::Error;

/// Common error type for trait operations.
///
/// Retryability is a property of the variant: [`TraitError::RateUnavailable`]
/// and [`TraitError::Unavailable`] are transient and worth retrying with
/// backoff; the rest are permanent for the request that produced them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TraitError {
    /// FX rate could not be obtained for the pair/date (transient).
    #[error("rate unavailable: {0}")]
    RateUnavailable(String),

    /// Backing store transiently unreachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Requested resource does not exist. Distinct from [`Self::Unavailable`]:
    /// a missing row is data, not connectivity.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write rejected because it would conflict with committed state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Parse/deserialization error.
    #[error("parse error: {0}")]
    ParseError(String),

    /// Operation timed out.
    #[error("timeout")]
    Timeout,

    /// Internal error in the implementation.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TraitError {
    /// True for transient failures that may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TraitError::RateUnavailable(_) | TraitError::Unavailable(_) | TraitError::Timeout
        )
    }
}
