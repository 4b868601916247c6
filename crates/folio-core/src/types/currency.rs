//! Currency type with ISO 4217 codes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// ISO 4217 currency codes.
///
/// Covers the reporting currencies of the portfolio plus the two fixed
/// normalization targets (USD and CAD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum Currency {
    /// United States Dollar
    #[default]
    USD,
    /// Canadian Dollar
    CAD,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen
    JPY,
    /// Swiss Franc
    CHF,
    /// Australian Dollar
    AUD,
    /// Swedish Krona
    SEK,
    /// Norwegian Krone
    NOK,
    /// Danish Krone
    DKK,
    /// Singapore Dollar
    SGD,
    /// Indian Rupee
    INR,
    /// Brazilian Real
    BRL,
    /// Mexican Peso
    MXN,
}

impl Currency {
    /// The two normalization targets every quarter is converted into,
    /// in publication order.
    pub const NORMALIZATION_TARGETS: [Currency; 2] = [Currency::USD, Currency::CAD];

    /// Returns the ISO 4217 3-letter code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::CAD => "CAD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CHF => "CHF",
            Currency::AUD => "AUD",
            Currency::SEK => "SEK",
            Currency::NOK => "NOK",
            Currency::DKK => "DKK",
            Currency::SGD => "SGD",
            Currency::INR => "INR",
            Currency::BRL => "BRL",
            Currency::MXN => "MXN",
        }
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "CAD" => Ok(Currency::CAD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "CHF" => Ok(Currency::CHF),
            "AUD" => Ok(Currency::AUD),
            "SEK" => Ok(Currency::SEK),
            "NOK" => Ok(Currency::NOK),
            "DKK" => Ok(Currency::DKK),
            "SGD" => Ok(Currency::SGD),
            "INR" => Ok(Currency::INR),
            "BRL" => Ok(Currency::BRL),
            "MXN" => Ok(Currency::MXN),
            other => Err(CoreError::UnknownCurrency(other.to_string())),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trips_through_from_str() {
        for ccy in [Currency::USD, Currency::CAD, Currency::EUR, Currency::SEK] {
            assert_eq!(ccy.code().parse::<Currency>().unwrap(), ccy);
        }
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("eur".parse::<Currency>().unwrap(), Currency::EUR);
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert!(matches!(
            "XYZ".parse::<Currency>(),
            Err(CoreError::UnknownCurrency(_))
        ));
    }
}
