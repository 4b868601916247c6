//! High-level transformation orchestration.
//!
//! The [`ReportingEngine`] drives one transformation unit per triggering
//! event (new input, corrected input, or rate update) through the state
//! machine `Received -> Converting -> Aggregating -> Published`, with
//! `Failed` exits out of the middle states.
//!
//! Units for different companies run concurrently; units for the same
//! company are serialized FIFO behind a fair per-company lock held for the
//! whole unit, so a correction to one quarter can never race a submission
//! that reads it as history. The lock is deliberately held across the rate
//! and store suspension points; the hold is bounded by the lock timeout of
//! waiting units.
//!
//! # Example
//!
//! ```ignore
//! use folio_engine::{EngineConfig, ReportingEngine};
//!
//! let engine = ReportingEngine::builder()
//!     .config(EngineConfig::default())
//!     .rates(fx_client)
//!     .history(store.clone())
//!     .results(store)
//!     .directory(companies)
//!     .build()?;
//!
//! let published = engine.submit(input).await?;
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use crate::accessor::TimeSeriesAccessor;
use crate::builder::ReportingEngineBuilder;
use crate::calculator::{self, MetricInputs};
use crate::config::{EngineConfig, LTM_WINDOW};
use crate::convert::validate_rate;
use crate::error::{EngineError, EngineResult, TransformationError, UnitPhase};
use crate::transformer::{self, RateSet, TransformedRow};
use folio_core::records::{CompanyProfile, InputMetrics, ReportingFinancials, ReportingMetrics};
use folio_core::types::{CompanyId, FiscalQuarter};
use folio_traits::{CompanyDirectory, HistoryStore, RateProvider, ResultStore, TraitError};

/// The complete published output of one transformation unit: the financials
/// and metrics rows for every unit currency, in matching order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedUnit {
    /// Currency-normalized financials rows.
    pub financials: Vec<ReportingFinancials>,
    /// Derived metrics rows.
    pub metrics: Vec<ReportingMetrics>,
}

/// Cooperative cancellation handle for a queued unit.
///
/// Cancellation is only honored before the unit enters `Converting`; once
/// conversion starts the unit runs to `Published` or `Failed` so partial
/// writes can never be observed.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create an uncancelled flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// True once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The transformation and metrics-derivation engine.
pub struct ReportingEngine {
    config: EngineConfig,
    rates: Arc<dyn RateProvider>,
    results: Arc<dyn ResultStore>,
    directory: Arc<dyn CompanyDirectory>,
    history: Arc<dyn HistoryStore>,
    accessor: TimeSeriesAccessor,
    /// Fair per-company locks; fairness gives FIFO ordering per company.
    locks: DashMap<CompanyId, Arc<Mutex<()>>>,
}

impl ReportingEngine {
    /// Create an engine from its collaborators.
    pub fn new(
        config: EngineConfig,
        rates: Arc<dyn RateProvider>,
        history: Arc<dyn HistoryStore>,
        results: Arc<dyn ResultStore>,
        directory: Arc<dyn CompanyDirectory>,
    ) -> Self {
        Self {
            config,
            rates,
            results,
            directory,
            accessor: TimeSeriesAccessor::new(history.clone()),
            history,
            locks: DashMap::new(),
        }
    }

    /// Start building an engine.
    pub fn builder() -> ReportingEngineBuilder {
        ReportingEngineBuilder::new()
    }

    /// Transform one input record and publish its derived rows.
    pub async fn submit(
        &self,
        input: InputMetrics,
    ) -> Result<PublishedUnit, TransformationError> {
        self.submit_cancellable(input, &CancelFlag::new()).await
    }

    /// [`Self::submit`] with a cancellation handle, honored only while the
    /// unit is still queued.
    pub async fn submit_cancellable(
        &self,
        input: InputMetrics,
        cancel: &CancelFlag,
    ) -> Result<PublishedUnit, TransformationError> {
        let received = |e| TransformationError::new(UnitPhase::Received, e);

        input.validate().map_err(|e| received(e.into()))?;
        debug!(company = %input.company_id, quarter = %input.fiscal_quarter, "unit received");

        let _guard = self.lock_company(input.company_id).await.map_err(received)?;
        if cancel.is_cancelled() {
            debug!(company = %input.company_id, quarter = %input.fiscal_quarter, "unit cancelled while queued");
            return Err(received(EngineError::Cancelled));
        }
        self.run_unit(&input).await
    }

    /// Re-run the transformation for a company-quarter from the latest
    /// stored input and current rates. Used after input corrections and
    /// rate updates; overwrites the previously published rows.
    pub async fn recompute(
        &self,
        company: CompanyId,
        quarter: FiscalQuarter,
    ) -> Result<PublishedUnit, TransformationError> {
        let received = |e| TransformationError::new(UnitPhase::Received, e);

        let _guard = self.lock_company(company).await.map_err(received)?;
        // Input is read under the lock so a concurrent correction cannot
        // slip between the read and the publish.
        let input = self
            .config
            .retry
            .execute(|| async { Ok(self.history.latest_input(company, quarter).await?) })
            .await
            .map_err(received)?
            .ok_or_else(|| {
                received(EngineError::NoStoredInput(format!("{company} {quarter}")))
            })?;
        input.validate().map_err(|e| received(e.into()))?;
        self.run_unit(&input).await
    }

    /// Drive one unit through Converting, Aggregating, and Publishing.
    /// Caller holds the company lock.
    async fn run_unit(
        &self,
        input: &InputMetrics,
    ) -> Result<PublishedUnit, TransformationError> {
        let company = input.company_id;
        let quarter = input.fiscal_quarter;

        debug!(%company, %quarter, "unit converting");
        let rows = self
            .converting(input)
            .await
            .map_err(|e| TransformationError::new(UnitPhase::Converting, e))?;

        debug!(%company, %quarter, "unit aggregating");
        let metrics = self
            .aggregating(input, &rows)
            .await
            .map_err(|e| TransformationError::new(UnitPhase::Aggregating, e))?;

        let financials: Vec<ReportingFinancials> =
            rows.into_iter().map(|row| row.financials).collect();
        let unit = PublishedUnit {
            financials,
            metrics,
        };

        self.config
            .retry
            .execute(|| async {
                self.results
                    .publish_atomic(unit.financials.clone(), unit.metrics.clone())
                    .await
                    .map_err(publish_error)
            })
            .await
            .map_err(|e| {
                warn!(%company, %quarter, error = %e, "unit failed to publish");
                TransformationError::new(UnitPhase::Publishing, e)
            })?;

        info!(%company, %quarter, currencies = unit.financials.len(), "unit published");
        Ok(unit)
    }

    /// Converting: fetch reference data and rates, produce all currency rows.
    async fn converting(&self, input: &InputMetrics) -> EngineResult<Vec<TransformedRow>> {
        let profile = self.fetch_profile(input.company_id).await?;

        let mut rates = RateSet::new(input.currency);
        for &target in &self.config.target_currencies {
            if target == input.currency {
                continue;
            }
            let raw = self
                .config
                .retry
                .execute(|| async {
                    self.rates
                        .rate(input.currency, target, input.fiscal_reporting_date)
                        .await
                        .map_err(EngineError::from)
                })
                .await?;
            rates.insert(target, validate_rate(input.currency, target, raw)?);
        }

        transformer::transform_all(input, &profile, &rates, &self.config.target_currencies)
    }

    /// Aggregating: consult the time-series accessor and compute the
    /// metrics row for every currency. Data gaps are nulls, not failures.
    async fn aggregating(
        &self,
        input: &InputMetrics,
        rows: &[TransformedRow],
    ) -> EngineResult<Vec<ReportingMetrics>> {
        let company = input.company_id;
        let quarter = input.fiscal_quarter;
        let prior_year_quarter = quarter.same_quarter_prior_year();
        let retry = &self.config.retry;

        let mut metrics = Vec::with_capacity(rows.len());
        for row in rows {
            let currency = row.financials.currency;

            let mut window = retry
                .execute(|| async {
                    self.accessor
                        .trailing_quarters(company, currency, quarter.prev(), LTM_WINDOW - 1)
                        .await
                })
                .await?;
            // The in-flight row completes the window; it is not read back
            // from the store, which still holds the pre-correction version
            // during a recomputation.
            window.push(row.financials.clone());

            let prior_year = retry
                .execute(|| async {
                    self.accessor
                        .same_quarter_prior_year(company, currency, quarter)
                        .await
                })
                .await?;
            let prior_year_window = retry
                .execute(|| async {
                    self.accessor
                        .trailing_quarters(company, currency, prior_year_quarter, LTM_WINDOW)
                        .await
                })
                .await?;

            metrics.push(calculator::calculate(&MetricInputs {
                current: &row.financials,
                valuation: &row.valuation,
                window: &window,
                prior_year: prior_year.as_ref(),
                prior_year_window: &prior_year_window,
            }));
        }
        Ok(metrics)
    }

    async fn fetch_profile(&self, company: CompanyId) -> EngineResult<CompanyProfile> {
        self.config
            .retry
            .execute(|| async {
                self.directory.company(company).await.map_err(|e| match e {
                    TraitError::NotFound(_) => EngineError::UnknownCompany(company),
                    other => other.into(),
                })
            })
            .await
    }

    /// Acquire the fair per-company lock, bounded by the configured timeout.
    async fn lock_company(
        &self,
        company: CompanyId,
    ) -> EngineResult<OwnedMutexGuard<()>> {
        let lock = self
            .locks
            .entry(company)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        tokio::time::timeout(self.config.lock_timeout, lock.lock_owned())
            .await
            .map_err(|_| EngineError::LockTimeout(self.config.lock_timeout))
    }
}

/// Publish failures: connectivity is retryable, everything else is storage.
fn publish_error(e: TraitError) -> EngineError {
    match e {
        TraitError::Unavailable(msg) => EngineError::AccessorUnavailable(msg),
        TraitError::Timeout => EngineError::AccessorUnavailable("timeout".to_string()),
        other => EngineError::Storage(other.to_string()),
    }
}
