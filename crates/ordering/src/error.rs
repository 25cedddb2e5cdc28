//! Unified error handling for ordering commands.
//!
//! Every variant is recoverable: the session is left exactly as it was before
//! the failing command, and the front end decides how loudly to surface it.

use makcik_core::{LineItemError, ValidationError};
use thiserror::Error;

use crate::session::Phase;

/// Errors returned by session operations and controller commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// One or more registration fields failed validation.
    #[error("Registration failed: {0}")]
    Validation(#[from] ValidationError),

    /// Finalize attempted with nothing in the cart.
    #[error("Your cart is empty. Add something before placing the order.")]
    EmptyCart,

    /// Add attempted with the placeholder option, or a dish not on the menu.
    #[error("No item selected")]
    InvalidSelection,

    /// Quantity outside the accepted range.
    #[error("Quantity must be between 1 and {max}, got {quantity}")]
    InvalidQuantity {
        /// The rejected quantity.
        quantity: i64,
        /// Largest accepted quantity.
        max: u32,
    },

    /// Negative unit price.
    #[error("Unit price cannot be negative, got {0}")]
    InvalidPrice(i64),

    /// Command not legal in the current phase.
    #[error("Cannot {action} while {phase}")]
    InvalidTransition {
        /// Phase the session was in.
        phase: Phase,
        /// What was attempted.
        action: &'static str,
    },
}

impl OrderError {
    /// Whether the front end should show this error to the customer.
    ///
    /// An empty placeholder selection is ignored without any feedback.
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        matches!(self, Self::InvalidSelection)
    }
}

impl From<LineItemError> for OrderError {
    fn from(err: LineItemError) -> Self {
        match err {
            LineItemError::InvalidSelection => Self::InvalidSelection,
            LineItemError::InvalidQuantity { quantity, max } => {
                Self::InvalidQuantity { quantity, max }
            }
            LineItemError::InvalidPrice(price) => Self::InvalidPrice(price),
        }
    }
}

/// Result type alias for `OrderError`.
pub type Result<T> = std::result::Result<T, OrderError>;
