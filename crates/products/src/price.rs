//! Fixed-point product price.
//!
//! Prices are stored as `NUMERIC(10,2)`: two fractional digits and at most eight
//! integral digits. On the wire they travel as plain JSON numbers.

use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, DomainResult, ValueObject};

/// Number of fractional digits kept for every price.
pub const PRICE_SCALE: u32 = 2;

/// Exclusive upper bound imposed by `NUMERIC(10,2)`.
fn price_limit() -> Decimal {
    Decimal::new(100_000_000, 0)
}

/// A non-negative decimal amount with two-digit precision.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    pub const ZERO: Price = Price(Decimal::ZERO);

    /// Validate and normalize a client-supplied amount.
    ///
    /// Rounds half away from zero to two fractional digits, then rejects negative
    /// amounts and amounts that do not fit the storage column.
    pub fn new(amount: Decimal) -> DomainResult<Self> {
        let rounded = amount.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);

        if rounded.is_sign_negative() && !rounded.is_zero() {
            return Err(DomainError::validation("price must not be negative"));
        }
        if rounded >= price_limit() {
            return Err(DomainError::validation(
                "price must be less than 100000000.00",
            ));
        }

        Ok(Self(rounded.abs()))
    }

    /// Wrap an amount read back from storage.
    ///
    /// Storage already enforces the column precision, so no validation happens here.
    pub fn from_storage(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl ValueObject for Price {}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|e| DomainError::validation(format!("price: {e}")))?;
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rounds_to_two_fractional_digits() {
        let price: Price = "11.225".parse().unwrap();
        assert_eq!(price.amount(), Decimal::new(1123, 2));

        let price: Price = "11.224".parse().unwrap();
        assert_eq!(price.amount(), Decimal::new(1122, 2));
    }

    #[test]
    fn rejects_negative_amounts() {
        let err = "-0.01".parse::<Price>().unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("negative")),
            _ => panic!("Expected Validation error for negative price"),
        }
    }

    #[test]
    fn negative_amount_rounding_to_zero_is_zero() {
        let price: Price = "-0.001".parse().unwrap();
        assert_eq!(price, Price::ZERO);
        assert!(!price.amount().is_sign_negative());
    }

    #[test]
    fn rejects_amounts_outside_numeric_10_2() {
        assert!("99999999.99".parse::<Price>().is_ok());
        assert!("100000000".parse::<Price>().is_err());
    }

    #[test]
    fn serializes_as_json_number() {
        let price: Price = "11.22".parse().unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "11.22");

        let back: Price = serde_json::from_str("11.22").unwrap();
        assert_eq!(back, price);

        let whole: Price = serde_json::from_str("30").unwrap();
        assert_eq!(whole.amount(), Decimal::new(30, 0));
    }

    #[test]
    fn display_always_shows_two_digits() {
        assert_eq!(Price::ZERO.to_string(), "0.00");
        assert_eq!("7.5".parse::<Price>().unwrap().to_string(), "7.50");
    }

    proptest! {
        #[test]
        fn whole_cents_survive_validation(cents in 0i64..10_000_000_000i64) {
            let amount = Decimal::new(cents, 2);
            let price = Price::new(amount).unwrap();
            prop_assert_eq!(price.amount(), amount);
        }

        #[test]
        fn normalized_scale_never_exceeds_two(mantissa in 0i64..100_000_000i64, scale in 0u32..8) {
            let price = Price::new(Decimal::new(mantissa, scale)).unwrap();
            prop_assert!(price.amount().scale() <= PRICE_SCALE);
        }

        #[test]
        fn negative_cents_are_rejected(cents in 1i64..10_000_000_000i64) {
            prop_assert!(Price::new(Decimal::new(-cents, 2)).is_err());
        }
    }
}
