//! In-memory company directory.

use async_trait::async_trait;
use dashmap::DashMap;

use folio_core::records::CompanyProfile;
use folio_core::types::CompanyId;
use folio_traits::{CompanyDirectory, TraitError};

/// Map-backed company reference data.
#[derive(Default)]
pub struct MemoryDirectory {
    profiles: DashMap<CompanyId, CompanyProfile>,
}

impl MemoryDirectory {
    /// Empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a company profile.
    pub fn insert(&self, profile: CompanyProfile) {
        self.profiles.insert(profile.company_id, profile);
    }
}

#[async_trait]
impl CompanyDirectory for MemoryDirectory {
    async fn company(&self, company: CompanyId) -> Result<CompanyProfile, TraitError> {
        self.profiles
            .get(&company)
            .map(|profile| profile.clone())
            .ok_or_else(|| TraitError::NotFound(format!("company {company}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::types::Currency;

    #[tokio::test]
    async fn lookup_and_not_found() {
        let directory = MemoryDirectory::new();
        let profile = CompanyProfile {
            company_id: CompanyId::random(),
            name: "Acme GmbH".to_string(),
            reporting_currency: Currency::EUR,
            equity_raised: None,
            post_money_valuation: None,
        };
        directory.insert(profile.clone());

        assert_eq!(
            directory.company(profile.company_id).await.unwrap(),
            profile
        );
        assert!(matches!(
            directory.company(CompanyId::random()).await,
            Err(TraitError::NotFound(_))
        ));
    }
}
