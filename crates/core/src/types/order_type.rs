//! Pickup or delivery.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::amount::Amount;

/// Flat fee charged for delivery orders.
pub const DEFAULT_DELIVERY_FEE: Amount = Amount::new(50);

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Pickup,
    #[default]
    Delivery,
}

impl OrderType {
    /// Fee for this order type given the flat delivery fee.
    #[must_use]
    pub const fn delivery_fee(self, flat_fee: Amount) -> Amount {
        match self {
            Self::Pickup => Amount::ZERO,
            Self::Delivery => flat_fee,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Delivery => "delivery",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderType {
    type Err = UnknownOrderType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pickup" | "pick-up" | "pick_up" => Ok(Self::Pickup),
            "delivery" => Ok(Self::Delivery),
            _ => Err(UnknownOrderType(s.to_owned())),
        }
    }
}

/// Returned when parsing an [`OrderType`] from an unrecognized name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown order type: {0} (expected pickup or delivery)")]
pub struct UnknownOrderType(pub String);
