//! Domain value types shared across the Folio crates.

mod currency;
mod ids;
mod quarter;

pub use currency::Currency;
pub use ids::CompanyId;
pub use quarter::FiscalQuarter;
