//! Quarterly record types flowing through the reporting pipeline.
//!
//! One [`InputMetrics`] record per company-quarter comes in; one
//! [`ReportingFinancials`] and one [`ReportingMetrics`] record per currency
//! come out. [`CompanyProfile`] carries the company-level reference data
//! joined in for the valuation metrics.

mod company;
mod financials;
mod input;
mod metrics;

pub use company::CompanyProfile;
pub use financials::ReportingFinancials;
pub use input::InputMetrics;
pub use metrics::ReportingMetrics;
