use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An exact monetary amount as written by the user. The scale is preserved,
/// so "12,50" stays `12.50` and "500" stays `500`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    /// Minor units, rounded half-away-from-zero. `None` if the value does not fit in `i64`.
    pub fn to_cents(self) -> Option<i64> {
        self.0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal)
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn display_keeps_written_scale() {
        let m = Money::from_decimal(Decimal::from_str("12.50").unwrap());
        assert_eq!(m.to_string(), "12.50");
        let m = Money::from_decimal(Decimal::from_str("500").unwrap());
        assert_eq!(m.to_string(), "500");
    }

    #[test]
    fn cents_roundtrip() {
        assert_eq!(Money::from_cents(1234).to_string(), "12.34");
        assert_eq!(Money::from_cents(1234).to_cents(), Some(1234));
    }

    #[test]
    fn to_cents_rounds_extra_precision() {
        let m = Money::from_decimal(Decimal::from_str("0.125").unwrap());
        assert_eq!(m.to_cents(), Some(13));
    }

    #[test]
    fn sum_of_amounts() {
        let total = Money::from_cents(150).checked_add(Money::from_cents(250)).unwrap();
        assert_eq!(total, Money::from_cents(400));
        assert!(!total.is_zero());
        assert!(Money::zero().is_zero());
    }

    #[test]
    fn checked_add_overflow_is_none() {
        let max = Money::from_decimal(Decimal::MAX);
        assert_eq!(max.checked_add(Money::from_cents(100)), None);
    }
}
