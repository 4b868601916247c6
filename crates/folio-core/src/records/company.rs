//! Company-level reference data.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CompanyId, Currency};

/// Company-level reference data joined into the valuation metrics.
///
/// Monetary fields are denominated in the company's local reporting
/// currency; the transformer converts them alongside the quarterly fields
/// before the calculator uses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Company identifier.
    pub company_id: CompanyId,
    /// Display name.
    pub name: String,
    /// Local reporting currency for quarterly submissions.
    pub reporting_currency: Currency,
    /// Cumulative equity raised, if known.
    pub equity_raised: Option<Decimal>,
    /// Latest post-money valuation, if known.
    pub post_money_valuation: Option<Decimal>,
}
