//! Builder for wiring a [`ReportingEngine`] from its collaborators.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::engine::ReportingEngine;
use crate::error::{EngineError, EngineResult};
use folio_traits::{CompanyDirectory, HistoryStore, RateProvider, ResultStore};

/// Dependency-injection builder for [`ReportingEngine`].
///
/// All four collaborators are mandatory; [`Self::build`] fails with a
/// configuration error naming the first missing one.
#[derive(Default)]
pub struct ReportingEngineBuilder {
    config: Option<EngineConfig>,
    rates: Option<Arc<dyn RateProvider>>,
    history: Option<Arc<dyn HistoryStore>>,
    results: Option<Arc<dyn ResultStore>>,
    directory: Option<Arc<dyn CompanyDirectory>>,
}

impl ReportingEngineBuilder {
    /// Start an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine configuration (defaults to [`EngineConfig::default`]).
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the FX rate provider.
    pub fn rates(mut self, rates: Arc<dyn RateProvider>) -> Self {
        self.rates = Some(rates);
        self
    }

    /// Set the history store.
    pub fn history(mut self, history: Arc<dyn HistoryStore>) -> Self {
        self.history = Some(history);
        self
    }

    /// Set the result store.
    pub fn results(mut self, results: Arc<dyn ResultStore>) -> Self {
        self.results = Some(results);
        self
    }

    /// Set the company directory.
    pub fn directory(mut self, directory: Arc<dyn CompanyDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Build the engine, checking all collaborators are present.
    pub fn build(self) -> EngineResult<ReportingEngine> {
        let missing = |what: &str| EngineError::ConfigError(format!("missing {what}"));
        Ok(ReportingEngine::new(
            self.config.unwrap_or_default(),
            self.rates.ok_or_else(|| missing("rate provider"))?,
            self.history.ok_or_else(|| missing("history store"))?,
            self.results.ok_or_else(|| missing("result store"))?,
            self.directory.ok_or_else(|| missing("company directory"))?,
        ))
    }
}
