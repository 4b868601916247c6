//! Atomic publication of derived rows.

use async_trait::async_trait;

use crate::error::TraitError;
use folio_core::records::{ReportingFinancials, ReportingMetrics};

/// Write side of the persistence layer.
///
/// One call publishes the complete output of a transformation unit: all
/// currency rows for both derived tables for one company-quarter. The write
/// is atomic; readers never observe a partially published quarter.
/// Republishing the same key overwrites the previous rows (recomputation).
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Atomically write all financials and metrics rows for one
    /// company-quarter, replacing any previously published rows for the
    /// same keys.
    async fn publish_atomic(
        &self,
        financials: Vec<ReportingFinancials>,
        metrics: Vec<ReportingMetrics>,
    ) -> Result<(), TraitError>;
}
