//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are stored as JSON numbers (the browser build wrote the output of
//! `parseFloat`), but are held in memory as a [`Decimal`] so display and
//! comparison never suffer from binary floating point.
//!
//! Amounts are rounded to whole cents and capped below ten trillion dollars.
//! Such a value has at most 15 significant digits, so it survives the trip
//! through a JSON number unchanged.

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a number")]
    NotANumber,
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount is at or above [`Price::LIMIT`] dollars.
    #[error("price must be below {}", Price::LIMIT)]
    TooLarge,
}

/// A non-negative price in the showcase's single currency (USD).
///
/// ## Examples
///
/// ```
/// use m5_core::Price;
///
/// let price = Price::parse("2999.99").unwrap();
/// assert_eq!(price.to_string(), "$2999.99");
///
/// assert_eq!(Price::parse("1.005").unwrap().to_string(), "$1.01");
/// assert!(Price::parse("-1").is_err());
/// assert!(Price::parse("free").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Exclusive upper bound in whole dollars.
    pub const LIMIT: i64 = 10_000_000_000_000;

    /// Create a price from a decimal amount, rounded half away from zero to
    /// whole cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero, or
    /// [`PriceError::TooLarge`] if the rounded amount reaches
    /// [`Price::LIMIT`].
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative);
        }
        let cents = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        if cents >= Decimal::from(Self::LIMIT) {
            return Err(PriceError::TooLarge);
        }
        Ok(Self(cents))
    }

    /// Parse a price from user input such as `"19.99"`.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a number, or negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }
        let amount = Decimal::from_str(trimmed).map_err(|_| PriceError::NotANumber)?;
        Self::new(amount)
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

/// Formats as dollars with exactly two decimals, e.g. `$1599.99`.
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Price::parse("0").unwrap(), Price::ZERO);
        assert_eq!(
            Price::parse(" 12.5 ").unwrap().amount(),
            Decimal::new(125, 1)
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(Price::parse(""), Err(PriceError::Empty));
        assert_eq!(Price::parse("   "), Err(PriceError::Empty));
        assert_eq!(Price::parse("twelve"), Err(PriceError::NotANumber));
        assert_eq!(Price::parse("-0.01"), Err(PriceError::Negative));
    }

    #[test]
    fn test_amount_is_rounded_to_cents() {
        let price = Price::parse("1.0000000000000000001").unwrap();
        assert_eq!(price, Price::parse("1").unwrap());
        assert_eq!(Price::parse("2.675").unwrap().amount(), Decimal::new(268, 2));
        assert_eq!(Price::parse("0.004").unwrap(), Price::ZERO);
    }

    #[test]
    fn test_rejects_amounts_past_limit() {
        assert_eq!(Price::parse("10000000000000"), Err(PriceError::TooLarge));
        assert_eq!(Price::parse("9999999999999.995"), Err(PriceError::TooLarge));
        assert!(Price::parse("9999999999999.99").is_ok());
    }

    #[test]
    fn test_json_number_keeps_every_valid_amount() {
        for raw in ["0.01", "1.0000000000000000001", "1599.99", "9999999999999.99"] {
            let price = Price::parse(raw).unwrap();
            let json = serde_json::to_string(&price).unwrap();
            assert_eq!(serde_json::from_str::<Price>(&json).unwrap(), price, "{raw} via {json}");
        }
    }

    #[test]
    fn test_display_rounds_to_cents() {
        assert_eq!(Price::parse("5").unwrap().to_string(), "$5.00");
        assert_eq!(Price::parse("1599.99").unwrap().to_string(), "$1599.99");
    }

    #[test]
    fn test_serializes_as_number() {
        let price = Price::parse("2999.99").unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "2999.99");

        let parsed: Price = serde_json::from_str("2999.99").unwrap();
        assert_eq!(parsed, price);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }
}
