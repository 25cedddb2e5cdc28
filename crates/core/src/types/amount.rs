//! Whole-number currency amounts.
//!
//! Menu prices are whole pesos, so amounts are plain unsigned integers with a
//! currency symbol attached only at display time. There is no decimal or cents
//! handling.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

/// Currency symbol used by [`Amount`]'s `Display` implementation.
pub const CURRENCY_SYMBOL: &str = "₱";

/// A non-negative amount of money in whole currency units.
///
/// ## Examples
///
/// ```
/// use makcik_core::Amount;
///
/// let subtotal = Amount::new(200) + Amount::new(50);
/// assert_eq!(subtotal.to_string(), "₱250");
/// assert_eq!(subtotal.display_with("PHP "), "PHP 250");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(0);

    /// Create an amount from whole currency units.
    #[must_use]
    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    /// Get the underlying number of whole units.
    #[must_use]
    pub const fn units(&self) -> u64 {
        self.0
    }

    /// Multiply by a quantity, saturating instead of overflowing.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Format with a caller-chosen currency symbol (e.g., `"₱250"`).
    #[must_use]
    pub fn display_with(&self, symbol: &str) -> String {
        format!("{symbol}{}", self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY_SYMBOL}{}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<u32> for Amount {
    fn from(units: u32) -> Self {
        Self(u64::from(units))
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_peso_sign() {
        assert_eq!(Amount::new(0).to_string(), "₱0");
        assert_eq!(Amount::new(1250).to_string(), "₱1250");
    }

    #[test]
    fn test_times() {
        assert_eq!(Amount::new(100).times(2), Amount::new(200));
        assert_eq!(Amount::new(100).times(0), Amount::ZERO);
        assert_eq!(Amount::new(u64::MAX).times(2), Amount::new(u64::MAX));
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        let total: Amount = core::iter::empty().sum();
        assert_eq!(total, Amount::ZERO);
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Amount::new(50)).unwrap();
        assert_eq!(json, "50");
    }
}
