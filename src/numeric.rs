/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/
//! Fixed-point `Price` and `Quantity` (§9: "replace dynamic-typed numerics
//! with a single fixed-point decimal abstraction"). Both wrap
//! `rust_decimal::Decimal` rather than a float, so comparisons and the
//! `BTreeMap` price-level ordering are exact.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trade or order price, always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Wraps `value` as a `Price` if it is strictly positive.
    pub fn new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub fn raw(&self) -> Decimal {
        self.0
    }

    /// True if `self` is an integer multiple of `tick_size`.
    #[must_use]
    pub fn is_aligned_to(&self, tick_size: Decimal) -> bool {
        if tick_size <= Decimal::ZERO {
            return false;
        }
        (self.0 / tick_size).fract().is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An order or trade quantity, always strictly positive. An order's
/// *remaining* quantity is tracked separately as a plain `Decimal` (see
/// `Order::remaining_quantity`), since it legitimately reaches zero once an
/// order is fully filled — a state this type cannot represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(Decimal);

impl Quantity {
    pub fn new(value: Decimal) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self(value))
        } else {
            None
        }
    }

    #[must_use]
    pub fn raw(&self) -> Decimal {
        self.0
    }

    /// The smaller of two quantities; used to size a fill (§4.3 step 2).
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn rejects_non_positive_price() {
        assert!(Price::new(dec!(0)).is_none());
        assert!(Price::new(dec!(-1)).is_none());
        assert!(Price::new(dec!(0.01)).is_some());
    }

    #[test]
    fn tick_alignment_checks_exact_multiples() {
        let price = Price::new(dec!(100.05)).unwrap();
        assert!(price.is_aligned_to(dec!(0.05)));
        assert!(!price.is_aligned_to(dec!(0.02)));
    }

    #[test]
    fn rejects_non_positive_quantity() {
        assert!(Quantity::new(dec!(0)).is_none());
        assert!(Quantity::new(dec!(-5)).is_none());
    }

    #[test]
    fn min_picks_the_smaller_operand() {
        let small = Quantity::new(dec!(3)).unwrap();
        let large = Quantity::new(dec!(7)).unwrap();
        assert_eq!(small.min(large), small);
        assert_eq!(large.min(small), small);
    }
}
