//! Table-driven FX rate provider.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use rust_decimal::Decimal;

use folio_core::types::Currency;
use folio_traits::{RateProvider, TraitError};

/// Rate provider backed by an explicit (source, target, date) table.
///
/// Pairs absent from the table are reported as
/// [`TraitError::RateUnavailable`], matching a live FX source with a data
/// gap.
#[derive(Default)]
pub struct FixedRateProvider {
    rates: DashMap<(Currency, Currency, NaiveDate), Decimal>,
    fail_next: AtomicU32,
}

impl FixedRateProvider {
    /// Empty provider; every lookup is unavailable until rates are set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rate for a pair on a date.
    pub fn set(&self, source: Currency, target: Currency, as_of: NaiveDate, rate: Decimal) {
        self.rates.insert((source, target, as_of), rate);
    }

    /// Make the next `n` lookups fail with a transient error.
    pub fn fail_next(&self, n: u32) {
        self.fail_next.store(n, Ordering::SeqCst);
    }

    fn take_fault(&self) -> bool {
        self.fail_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl RateProvider for FixedRateProvider {
    async fn rate(
        &self,
        source: Currency,
        target: Currency,
        as_of: NaiveDate,
    ) -> Result<Decimal, TraitError> {
        if self.take_fault() {
            return Err(TraitError::RateUnavailable(format!(
                "injected fault for {source}->{target}"
            )));
        }
        self.rates
            .get(&(source, target, as_of))
            .map(|rate| *rate)
            .ok_or_else(|| {
                TraitError::RateUnavailable(format!("{source}->{target} on {as_of}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn returns_set_rates_and_reports_gaps() {
        let provider = FixedRateProvider::new();
        let date = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
        provider.set(Currency::EUR, Currency::USD, date, dec!(1.10));

        let rate = provider.rate(Currency::EUR, Currency::USD, date).await;
        assert_eq!(rate.unwrap(), dec!(1.10));

        let gap = provider.rate(Currency::EUR, Currency::CAD, date).await;
        assert!(matches!(gap, Err(TraitError::RateUnavailable(_))));
    }

    #[tokio::test]
    async fn injected_faults_are_consumed_in_order() {
        let provider = FixedRateProvider::new();
        let date = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
        provider.set(Currency::EUR, Currency::USD, date, dec!(1.10));
        provider.fail_next(2);

        for _ in 0..2 {
            assert!(provider
                .rate(Currency::EUR, Currency::USD, date)
                .await
                .is_err());
        }
        assert!(provider
            .rate(Currency::EUR, Currency::USD, date)
            .await
            .is_ok());
    }
}
