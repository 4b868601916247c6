//! # Folio Traits
//!
//! Trait definitions for the Folio reporting engine.
//!
//! This crate contains ONLY trait definitions with ZERO runtime dependencies.
//! All implementations live in separate extension crates (or in the service
//! layer that embeds the engine).
//!
//! ## Module Structure
//!
//! - [`rates`]: FX rate lookup ([`rates::RateProvider`])
//! - [`history`]: Read access to stored inputs and published financials
//!   ([`history::HistoryStore`])
//! - [`results`]: Atomic publication of derived rows ([`results::ResultStore`])
//! - [`directory`]: Company reference data ([`directory::CompanyDirectory`])
//!
//! ## Dependency Injection
//!
//! The reporting engine consumes these traits via dependency injection:
//!
//! ```ignore
//! ReportingEngine::builder()
//!     .rates(impl RateProvider)
//!     .history(impl HistoryStore)
//!     .results(impl ResultStore)
//!     .directory(impl CompanyDirectory)
//!     .build()?
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod directory;
pub mod error;
pub mod history;
pub mod rates;
pub mod results;

pub use directory::CompanyDirectory;
pub use error::TraitError;
pub use history::HistoryStore;
pub use rates::RateProvider;
pub use results::ResultStore;
