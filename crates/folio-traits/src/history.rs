//! Read access to stored inputs and previously published financials.

use async_trait::async_trait;

use crate::error::TraitError;
use folio_core::records::{InputMetrics, ReportingFinancials};
use folio_core::types::{CompanyId, Currency, FiscalQuarter};

/// Read-only view over the persistence layer.
///
/// The store returns whatever committed rows exist; the *selection* logic
/// (contiguity of trailing windows, year-over-year quarter arithmetic) lives
/// in the engine's time-series accessor, not here. Reads must reflect the
/// latest published values and never observe in-flight writes.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// The published financials row for one company-currency-quarter, if any.
    async fn financials_at(
        &self,
        company: CompanyId,
        currency: Currency,
        quarter: FiscalQuarter,
    ) -> Result<Option<ReportingFinancials>, TraitError>;

    /// All published financials rows for the inclusive quarter range
    /// `[from, to]`, ordered by quarter ascending. Gaps are simply absent
    /// rows; the store does not interpolate.
    async fn financials_range(
        &self,
        company: CompanyId,
        currency: Currency,
        from: FiscalQuarter,
        to: FiscalQuarter,
    ) -> Result<Vec<ReportingFinancials>, TraitError>;

    /// The latest stored input version for one company-quarter, if any.
    /// Used by recomputation after corrections.
    async fn latest_input(
        &self,
        company: CompanyId,
        quarter: FiscalQuarter,
    ) -> Result<Option<InputMetrics>, TraitError>;
}
