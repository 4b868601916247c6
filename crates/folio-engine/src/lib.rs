//! # Folio Engine
//!
//! The transformation and metrics-derivation engine for quarterly portfolio
//! company reporting.
//!
//! Given one raw [`folio_core::records::InputMetrics`] record and an FX rate
//! source, the engine produces the currency-normalized
//! [`folio_core::records::ReportingFinancials`] rows (local, USD, CAD) and
//! the fully derived [`folio_core::records::ReportingMetrics`] rows,
//! including the trailing (LTM) and year-over-year aggregates that consult
//! the company's published history.
//!
//! ## Components
//!
//! - [`convert`]: pure currency conversion with the fixed-point policy
//! - [`accessor`]: strict trailing-window and prior-year selection over the
//!   history store
//! - [`transformer`]: one input record into one row per target currency
//! - [`calculator`]: all single-period and multi-period derived metrics
//! - [`engine`]: the orchestrator - state machine, per-company FIFO
//!   serialization, bounded retries, atomic publication
//!
//! Collaborators (FX API, persistence) are consumed through the traits in
//! `folio-traits` and injected via [`engine::ReportingEngine::builder`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod accessor;
pub mod builder;
pub mod calculator;
pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod retry;
pub mod transformer;

pub use builder::ReportingEngineBuilder;
pub use config::EngineConfig;
pub use engine::{CancelFlag, PublishedUnit, ReportingEngine};
pub use error::{EngineError, EngineResult, TransformationError, UnitPhase};
pub use retry::RetryConfig;
