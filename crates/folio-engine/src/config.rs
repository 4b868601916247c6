//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::retry::RetryConfig;
use folio_core::types::Currency;

/// Number of quarters in the trailing LTM window.
pub const LTM_WINDOW: u32 = 4;

/// Configuration for the reporting engine.
///
/// Passed explicitly to [`crate::engine::ReportingEngine`]; there is no
/// process-wide configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Non-local currencies every quarter is normalized into.
    pub target_currencies: Vec<Currency>,
    /// Bound on waiting for the per-company serialization lock.
    pub lock_timeout: Duration,
    /// Retry policy for transient rate/store failures.
    pub retry: RetryConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_currencies: Currency::NORMALIZATION_TARGETS.to_vec(),
            lock_timeout: Duration::from_secs(30),
            retry: RetryConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Minimal configuration for tests: no retries, short lock bound.
    pub fn minimal() -> Self {
        Self {
            target_currencies: Currency::NORMALIZATION_TARGETS.to_vec(),
            lock_timeout: Duration::from_secs(2),
            retry: RetryConfig {
                max_attempts: 1,
                ..RetryConfig::default()
            },
        }
    }
}
