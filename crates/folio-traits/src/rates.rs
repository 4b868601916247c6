//! FX rate lookup trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::TraitError;
use folio_core::types::Currency;

/// Source of foreign-exchange rates.
///
/// Rates are expressed as units of `target` per unit of `source` and must be
/// strictly positive. Implementations are backed by an external FX API with
/// their own caching and retry; the engine only requires this contract and
/// tolerates transient [`TraitError::RateUnavailable`] with bounded retries.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// The rate converting `source` into `target` as of `as_of`.
    async fn rate(
        &self,
        source: Currency,
        target: Currency,
        as_of: NaiveDate,
    ) -> Result<Decimal, TraitError>;
}
