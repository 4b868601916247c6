//! Fixed-point rounding policy and null-propagating decimal arithmetic.
//!
//! Every rounded value stored by the engine goes through one of the policy
//! functions here: monetary amounts at 2 dp, ratios at 4 dp, exchange rates
//! at 6 dp, runway at 1 dp, all round-half-up. Unavailable inputs and zero
//! denominators propagate as `None` through [`safe_div`] and
//! [`growth_rate`], so the division-by-zero policy lives in exactly one
//! place.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places for stored monetary amounts.
pub const MONEY_DP: u32 = 2;
/// Decimal places for stored ratios and growth rates.
pub const RATIO_DP: u32 = 4;
/// Decimal places for stored exchange rates.
pub const RATE_DP: u32 = 6;
/// Decimal places for runway months.
pub const RUNWAY_DP: u32 = 1;

/// Round a monetary amount to the storage precision (2 dp, half-up).
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a ratio or growth rate to the storage precision (4 dp, half-up).
#[must_use]
pub fn round_ratio(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATIO_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Round an exchange rate to the storage precision (6 dp, half-up).
#[must_use]
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATE_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Round runway months to the storage precision (1 dp, half-up).
#[must_use]
pub fn round_runway(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RUNWAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Null-propagating division.
///
/// Returns `None` when either side is unavailable or the denominator is
/// zero. Never panics, never yields infinity or a sentinel value.
#[must_use]
pub fn safe_div(numerator: Option<Decimal>, denominator: Option<Decimal>) -> Option<Decimal> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if !d.is_zero() => Some(n / d),
        _ => None,
    }
}

/// Null-propagating growth rate: `(current - previous) / previous`.
///
/// `None` when either period is unavailable or the previous value is zero.
#[must_use]
pub fn growth_rate(current: Option<Decimal>, previous: Option<Decimal>) -> Option<Decimal> {
    let prev = previous?;
    safe_div(current.map(|c| c - prev), Some(prev))
}
