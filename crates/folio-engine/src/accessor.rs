//! Time-series access with strict window selection.
//!
//! The [`HistoryStore`] returns whatever committed rows exist; this module
//! owns *which* quarters to ask for and how to treat gaps. Trailing windows
//! are strictly consecutive by calendar quarter: a missing intermediate
//! quarter truncates the window, it never splices non-adjacent quarters
//! together. The caller treats a short window as "LTM unavailable".

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::EngineResult;
use folio_core::records::ReportingFinancials;
use folio_core::types::{CompanyId, Currency, FiscalQuarter};
use folio_traits::HistoryStore;

/// Read-side selection logic over the history store.
#[derive(Clone)]
pub struct TimeSeriesAccessor {
    history: Arc<dyn HistoryStore>,
}

impl TimeSeriesAccessor {
    /// Create an accessor over a history store.
    pub fn new(history: Arc<dyn HistoryStore>) -> Self {
        Self { history }
    }

    /// The up-to-`n` published quarters ending at and including `as_of`,
    /// strictly consecutive, ordered oldest-first.
    ///
    /// If `as_of` itself is unpublished the window is empty. A gap anywhere
    /// in the range cuts the window at the gap; rows older than the gap are
    /// dropped.
    pub async fn trailing_quarters(
        &self,
        company: CompanyId,
        currency: Currency,
        as_of: FiscalQuarter,
        n: u32,
    ) -> EngineResult<Vec<ReportingFinancials>> {
        if n == 0 {
            return Ok(Vec::new());
        }
        let from = as_of.minus_quarters(n - 1);
        let rows = self
            .history
            .financials_range(company, currency, from, as_of)
            .await?;

        let mut by_ordinal: HashMap<i64, ReportingFinancials> = rows
            .into_iter()
            .map(|row| (row.fiscal_quarter.ordinal(), row))
            .collect();

        // Walk back from as_of, stopping at the first missing quarter.
        let mut window = Vec::with_capacity(n as usize);
        let mut cursor = as_of;
        for _ in 0..n {
            match by_ordinal.remove(&cursor.ordinal()) {
                Some(row) => window.push(row),
                None => {
                    if !window.is_empty() {
                        debug!(
                            %company,
                            %currency,
                            missing = %cursor,
                            "trailing window truncated at gap"
                        );
                    }
                    break;
                }
            }
            cursor = cursor.prev();
        }
        window.reverse();
        Ok(window)
    }

    /// The published row for the same-numbered quarter exactly one year
    /// earlier, or `None` if that quarter was never published.
    pub async fn same_quarter_prior_year(
        &self,
        company: CompanyId,
        currency: Currency,
        as_of: FiscalQuarter,
    ) -> EngineResult<Option<ReportingFinancials>> {
        let prior = as_of.same_quarter_prior_year();
        Ok(self.history.financials_at(company, currency, prior).await?)
    }
}
