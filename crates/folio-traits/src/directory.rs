//! Company reference data trait.

use async_trait::async_trait;

use crate::error::TraitError;
use folio_core::records::CompanyProfile;
use folio_core::types::CompanyId;

/// Source of company-level reference data.
///
/// Provides the valuation fields (equity raised, post-money valuation) that
/// the metrics calculator joins in. A company with no profile on record is
/// [`TraitError::NotFound`]; a profile whose valuation fields are `None` is
/// valid data and simply yields `None` valuation metrics downstream.
#[async_trait]
pub trait CompanyDirectory: Send + Sync {
    /// The reference profile for a company.
    async fn company(&self, company: CompanyId) -> Result<CompanyProfile, TraitError>;
}
