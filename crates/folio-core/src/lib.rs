//! # Folio Core
//!
//! Core types and abstractions for the Folio quarterly reporting engine.
//!
//! This crate provides the foundational building blocks used throughout Folio:
//!
//! - **Types**: Domain-specific types like [`types::Currency`],
//!   [`types::FiscalQuarter`], and [`types::CompanyId`]
//! - **Records**: The quarterly record types flowing through the pipeline:
//!   [`records::InputMetrics`], [`records::ReportingFinancials`],
//!   [`records::ReportingMetrics`], and [`records::CompanyProfile`]
//! - **Math**: The fixed-point rounding policy and null-propagating decimal
//!   arithmetic used by the metrics calculator
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes and explicit record structs prevent
//!   stringly-typed field access
//! - **Nulls Are Data**: unavailable metrics are `Option::None`, never a
//!   sentinel value; the helpers in [`math`] enforce that policy in one place
//! - **Explicit Over Implicit**: all rounding goes through the [`math`]
//!   policy functions, never ad-hoc `round_dp` calls

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod math;
pub mod records;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::math::{growth_rate, round_money, round_rate, round_ratio, safe_div};
    pub use crate::records::{
        CompanyProfile, InputMetrics, ReportingFinancials, ReportingMetrics,
    };
    pub use crate::types::{CompanyId, Currency, FiscalQuarter};
}

pub use error::{CoreError, CoreResult};
pub use records::{CompanyProfile, InputMetrics, ReportingFinancials, ReportingMetrics};
pub use types::{CompanyId, Currency, FiscalQuarter};
