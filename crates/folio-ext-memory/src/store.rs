//! Combined in-memory history and result store.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::Mutex;

use folio_core::records::{InputMetrics, ReportingFinancials, ReportingMetrics};
use folio_core::types::{CompanyId, Currency, FiscalQuarter};
use folio_traits::{HistoryStore, ResultStore, TraitError};

type FinKey = (CompanyId, Currency, i64);

/// In-memory store implementing both the read (history) and write (result)
/// sides of the persistence contract.
///
/// Publication takes a single write lock and inserts all rows before
/// returning, so readers on other tasks observe a quarter either completely
/// or not at all, matching the transactional store the engine expects in
/// production.
#[derive(Default)]
pub struct MemoryStore {
    inputs: DashMap<(CompanyId, i64), InputMetrics>,
    financials: DashMap<FinKey, ReportingFinancials>,
    metrics: DashMap<FinKey, ReportingMetrics>,
    publish_lock: Mutex<()>,
    fail_reads: AtomicU32,
    fail_publishes: AtomicU32,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an input version, replacing any prior version for the key.
    pub fn put_input(&self, input: InputMetrics) {
        self.inputs.insert(
            (input.company_id, input.fiscal_quarter.ordinal()),
            input,
        );
    }

    /// The published financials row for a key, if any.
    pub fn financials(
        &self,
        company: CompanyId,
        currency: Currency,
        quarter: FiscalQuarter,
    ) -> Option<ReportingFinancials> {
        self.financials
            .get(&(company, currency, quarter.ordinal()))
            .map(|row| row.clone())
    }

    /// The published metrics row for a key, if any.
    pub fn metrics(
        &self,
        company: CompanyId,
        currency: Currency,
        quarter: FiscalQuarter,
    ) -> Option<ReportingMetrics> {
        self.metrics
            .get(&(company, currency, quarter.ordinal()))
            .map(|row| row.clone())
    }

    /// Total published row count across both tables.
    pub fn published_rows(&self) -> usize {
        self.financials.len() + self.metrics.len()
    }

    /// Delete one published financials row, creating a history gap.
    pub fn remove_financials(
        &self,
        company: CompanyId,
        currency: Currency,
        quarter: FiscalQuarter,
    ) {
        self.financials
            .remove(&(company, currency, quarter.ordinal()));
    }

    /// Make the next `n` history reads fail with a transient error.
    pub fn fail_next_reads(&self, n: u32) {
        self.fail_reads.store(n, Ordering::SeqCst);
    }

    /// Make the next `n` publishes fail with a transient error.
    pub fn fail_next_publishes(&self, n: u32) {
        self.fail_publishes.store(n, Ordering::SeqCst);
    }

    fn take_fault(counter: &AtomicU32) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn check_read_fault(&self) -> Result<(), TraitError> {
        if Self::take_fault(&self.fail_reads) {
            Err(TraitError::Unavailable("injected read fault".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn financials_at(
        &self,
        company: CompanyId,
        currency: Currency,
        quarter: FiscalQuarter,
    ) -> Result<Option<ReportingFinancials>, TraitError> {
        self.check_read_fault()?;
        Ok(self.financials(company, currency, quarter))
    }

    async fn financials_range(
        &self,
        company: CompanyId,
        currency: Currency,
        from: FiscalQuarter,
        to: FiscalQuarter,
    ) -> Result<Vec<ReportingFinancials>, TraitError> {
        self.check_read_fault()?;
        let mut rows: Vec<ReportingFinancials> = self
            .financials
            .iter()
            .filter(|entry| {
                let (row_company, row_currency, ordinal) = *entry.key();
                row_company == company
                    && row_currency == currency
                    && (from.ordinal()..=to.ordinal()).contains(&ordinal)
            })
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by_key(|row| row.fiscal_quarter.ordinal());
        Ok(rows)
    }

    async fn latest_input(
        &self,
        company: CompanyId,
        quarter: FiscalQuarter,
    ) -> Result<Option<InputMetrics>, TraitError> {
        self.check_read_fault()?;
        Ok(self
            .inputs
            .get(&(company, quarter.ordinal()))
            .map(|input| input.clone()))
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn publish_atomic(
        &self,
        financials: Vec<ReportingFinancials>,
        metrics: Vec<ReportingMetrics>,
    ) -> Result<(), TraitError> {
        if Self::take_fault(&self.fail_publishes) {
            return Err(TraitError::Unavailable(
                "injected publish fault".to_string(),
            ));
        }
        let _write = self.publish_lock.lock();
        for row in financials {
            self.financials.insert(
                (row.company_id, row.currency, row.fiscal_quarter.ordinal()),
                row,
            );
        }
        for row in metrics {
            self.metrics.insert(
                (row.company_id, row.currency, row.fiscal_quarter.ordinal()),
                row,
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn q(year: i32, quarter: u8) -> FiscalQuarter {
        FiscalQuarter::new(year, quarter).unwrap()
    }

    fn row(company: CompanyId, quarter: FiscalQuarter) -> ReportingFinancials {
        ReportingFinancials {
            company_id: company,
            currency: Currency::USD,
            exchange_rate_used: Decimal::ONE,
            total_revenue: dec!(100),
            recurring_revenue: dec!(80),
            gross_profit: dec!(60),
            sales_marketing_expense: dec!(15),
            total_operating_expense: dec!(80),
            ebitda: dec!(10),
            net_income: dec!(5),
            cash_burn: dec!(20),
            cash_balance: dec!(100),
            debt_outstanding: None,
            employees: 10,
            customers: None,
            fiscal_reporting_date: quarter.end_date(),
            fiscal_quarter: quarter,
        }
    }

    #[tokio::test]
    async fn publish_then_read_range_in_order() {
        let store = MemoryStore::new();
        let company = CompanyId::random();
        store
            .publish_atomic(
                vec![row(company, q(2023, 2)), row(company, q(2023, 1))],
                vec![],
            )
            .await
            .unwrap();

        let rows = store
            .financials_range(company, Currency::USD, q(2022, 3), q(2023, 2))
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].fiscal_quarter, q(2023, 1));
        assert_eq!(rows[1].fiscal_quarter, q(2023, 2));
    }

    #[tokio::test]
    async fn republishing_overwrites_the_same_key() {
        let store = MemoryStore::new();
        let company = CompanyId::random();
        let mut first = row(company, q(2023, 1));
        first.total_revenue = dec!(100);
        store.publish_atomic(vec![first], vec![]).await.unwrap();

        let mut corrected = row(company, q(2023, 1));
        corrected.total_revenue = dec!(120);
        store.publish_atomic(vec![corrected], vec![]).await.unwrap();

        let read = store.financials(company, Currency::USD, q(2023, 1)).unwrap();
        assert_eq!(read.total_revenue, dec!(120));
    }

    #[tokio::test]
    async fn read_faults_expire() {
        let store = MemoryStore::new();
        let company = CompanyId::random();
        store.fail_next_reads(1);
        assert!(store
            .financials_at(company, Currency::USD, q(2023, 1))
            .await
            .is_err());
        assert!(store
            .financials_at(company, Currency::USD, q(2023, 1))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn stores_latest_input_version() {
        let store = MemoryStore::new();
        let company = CompanyId::random();
        let quarter = q(2023, 2);
        let base = InputMetrics {
            company_id: company,
            currency: Currency::USD,
            total_revenue: dec!(100),
            recurring_revenue: dec!(80),
            gross_profit: dec!(60),
            sales_marketing_expense: dec!(15),
            total_operating_expense: dec!(80),
            ebitda: dec!(10),
            net_income: dec!(5),
            cash_burn: dec!(20),
            cash_balance: dec!(100),
            debt_outstanding: None,
            employees: 10,
            customers: None,
            fiscal_reporting_date: NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
            fiscal_quarter: quarter,
        };
        store.put_input(base.clone());
        let mut corrected = base;
        corrected.total_revenue = dec!(110);
        store.put_input(corrected);

        let latest = store.latest_input(company, quarter).await.unwrap().unwrap();
        assert_eq!(latest.total_revenue, dec!(110));
    }
}
