//! Currency conversion.
//!
//! Pure functions, no state. The conversion contract: rates are units of
//! target currency per unit of source currency, strictly positive; nulls
//! propagate; results land on the monetary storage precision.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use folio_core::math::{round_money, round_rate};
use folio_core::types::Currency;

/// Validate a looked-up rate against the rate contract.
///
/// `rust_decimal` values are always finite, so the only violation is a
/// non-positive rate. Violations are configuration errors: fatal for the
/// record, never retried.
pub fn validate_rate(source: Currency, target: Currency, rate: Decimal) -> EngineResult<Decimal> {
    if rate <= Decimal::ZERO {
        return Err(EngineError::InvalidRate {
            pair: format!("{source}->{target}"),
            rate,
        });
    }
    Ok(round_rate(rate))
}

/// Convert a monetary amount with a pre-validated rate.
///
/// `None` in, `None` out: an unreported field stays unreported in every
/// currency, never coerced to zero. The product is rounded to the monetary
/// storage precision (2 dp, half-up).
pub fn convert(amount: Option<Decimal>, rate: Decimal) -> Option<Decimal> {
    amount.map(|a| round_money(a * rate))
}

/// Convert a mandatory monetary field.
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Decimal {
    round_money(amount * rate)
}
