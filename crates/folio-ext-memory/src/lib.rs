//! # Folio Ext Memory
//!
//! In-memory implementations of the Folio engine traits.
//!
//! Used by the engine's integration tests and as the reference
//! implementation for new extension crates:
//!
//! - [`FixedRateProvider`]: table-driven FX rates with fault injection
//! - [`MemoryStore`]: combined history + result store with atomic publish
//! - [`MemoryDirectory`]: company reference data
//!
//! Fault injection (`fail_next_*`) makes the next n calls fail with a
//! transient error, for exercising the engine's retry and failure paths.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod directory;
mod rates;
mod store;

pub use directory::MemoryDirectory;
pub use rates::FixedRateProvider;
pub use store::MemoryStore;
