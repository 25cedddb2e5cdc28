//! The ordering session state machine.
//!
//! A [`Session`] owns the customer record and the cart. Its [`Phase`] is
//! derived from what it holds rather than stored separately:
//!
//! ```text
//!  Unregistered ──register──▶ Registered ──finalize──▶ Confirming
//!                                 ▲                        │
//!                                 ├──────confirm (cart cleared)
//!                                 └──────close (cart kept)─┘
//! ```
//!
//! Every operation either succeeds completely or leaves the session untouched.

use core::fmt;

use makcik_core::{
    Amount, Cart, CustomerRecord, LineItemDraft, OrderLineItem, OrderType, RegistrationForm,
};
use serde::Serialize;
use tracing::info;

use crate::config::OrderingConfig;
use crate::error::{OrderError, Result};
use crate::summary::{OrderSummary, SubmittedOrder, Totals};

/// Current phase of the customer's interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No customer record yet.
    Unregistered,
    /// Building the order.
    Registered,
    /// Reviewing the order summary.
    Confirming,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unregistered => "unregistered",
            Self::Registered => "registered",
            Self::Confirming => "confirming",
        })
    }
}

/// One customer's in-memory ordering session.
#[derive(Debug, Clone)]
pub struct Session {
    customer: Option<CustomerRecord>,
    cart: Cart,
    order_type: OrderType,
    confirming: bool,
    delivery_fee: Amount,
    max_quantity: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&OrderingConfig::default())
    }
}

impl Session {
    #[must_use]
    pub const fn new(config: &OrderingConfig) -> Self {
        Self {
            customer: None,
            cart: Cart::new(),
            order_type: OrderType::Delivery,
            confirming: false,
            delivery_fee: config.delivery_fee,
            max_quantity: config.max_quantity,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        match (&self.customer, self.confirming) {
            (None, _) => Phase::Unregistered,
            (Some(_), false) => Phase::Registered,
            (Some(_), true) => Phase::Confirming,
        }
    }

    #[must_use]
    pub const fn customer(&self) -> Option<&CustomerRecord> {
        self.customer.as_ref()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn order_type(&self) -> OrderType {
        self.order_type
    }

    #[must_use]
    pub const fn max_quantity(&self) -> u32 {
        self.max_quantity
    }

    fn require(&self, phase: Phase, action: &'static str) -> Result<()> {
        let current = self.phase();
        if current == phase {
            Ok(())
        } else {
            Err(OrderError::InvalidTransition {
                phase: current,
                action,
            })
        }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Validate the form and register the customer.
    ///
    /// # Errors
    ///
    /// - [`OrderError::InvalidTransition`] if a customer is already registered
    /// - [`OrderError::Validation`] listing every invalid field; nothing is stored
    pub fn register(&mut self, form: RegistrationForm) -> Result<&CustomerRecord> {
        self.require(Phase::Unregistered, "register")?;
        let record = form.validate()?;
        info!(customer = %record.full_name(), "Customer registered");
        Ok(self.customer.insert(record))
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Append a line to the cart.
    ///
    /// # Errors
    ///
    /// - [`OrderError::InvalidTransition`] unless the session is `Registered`
    /// - [`OrderError::InvalidSelection`] for a blank item name
    /// - [`OrderError::InvalidQuantity`] / [`OrderError::InvalidPrice`] when out of bounds
    pub fn add_item(&mut self, draft: LineItemDraft) -> Result<&Cart> {
        self.require(Phase::Registered, "add an item")?;
        let item = draft.into_line_item(self.max_quantity)?;
        info!(
            item = %item.name(),
            quantity = item.quantity(),
            line_total = %item.line_total(),
            "Added to order"
        );
        self.cart.push(item);
        Ok(&self.cart)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// [`OrderError::InvalidTransition`] unless the session is `Registered`.
    pub fn clear_cart(&mut self) -> Result<()> {
        self.require(Phase::Registered, "clear the cart")?;
        self.cart.clear();
        Ok(())
    }

    /// Switch between pickup and delivery.
    ///
    /// # Errors
    ///
    /// [`OrderError::InvalidTransition`] unless the session is `Registered`.
    pub fn set_order_type(&mut self, order_type: OrderType) -> Result<()> {
        self.require(Phase::Registered, "change the order type")?;
        self.order_type = order_type;
        Ok(())
    }

    #[must_use]
    pub fn line_total(item: &OrderLineItem) -> Amount {
        item.line_total()
    }

    #[must_use]
    pub fn subtotal(&self) -> Amount {
        self.cart.subtotal()
    }

    #[must_use]
    pub const fn delivery_fee(&self, order_type: OrderType) -> Amount {
        order_type.delivery_fee(self.delivery_fee)
    }

    #[must_use]
    pub fn grand_total(&self, order_type: OrderType) -> Amount {
        self.cart.grand_total(order_type, self.delivery_fee)
    }

    /// Totals for the current cart and order type.
    #[must_use]
    pub fn totals(&self) -> Totals {
        Totals::compute(&self.cart, self.order_type, self.delivery_fee)
    }

    // =========================================================================
    // Confirmation
    // =========================================================================

    fn summary_for(&self, customer: &CustomerRecord) -> OrderSummary {
        OrderSummary::compute(customer, &self.cart, self.order_type, self.delivery_fee)
    }

    /// Current summary, if a customer is registered.
    #[must_use]
    pub fn summary(&self) -> Option<OrderSummary> {
        self.customer.as_ref().map(|c| self.summary_for(c))
    }

    /// Open the confirmation step.
    ///
    /// # Errors
    ///
    /// - [`OrderError::InvalidTransition`] unless the session is `Registered`
    /// - [`OrderError::EmptyCart`] if there is nothing to order
    pub fn finalize_order(&mut self) -> Result<OrderSummary> {
        self.require(Phase::Registered, "place the order")?;
        let Some(customer) = &self.customer else {
            return Err(OrderError::InvalidTransition {
                phase: Phase::Unregistered,
                action: "place the order",
            });
        };
        if self.cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let summary = self.summary_for(customer);
        self.confirming = true;
        info!(
            lines = summary.lines.len(),
            grand_total = %summary.totals.grand_total,
            "Reviewing order"
        );
        Ok(summary)
    }

    /// Submit the order under review, then start a fresh cart.
    ///
    /// # Errors
    ///
    /// [`OrderError::InvalidTransition`] unless the session is `Confirming`.
    pub fn confirm_order(&mut self) -> Result<SubmittedOrder> {
        self.require(Phase::Confirming, "confirm the order")?;
        let Some(summary) = self.summary() else {
            return Err(OrderError::InvalidTransition {
                phase: Phase::Unregistered,
                action: "confirm the order",
            });
        };
        let order = SubmittedOrder::stamp(summary);
        self.cart.clear();
        self.confirming = false;
        info!(
            reference = %order.reference,
            grand_total = %order.grand_total(),
            "Order sent to the restaurant"
        );
        Ok(order)
    }

    /// Leave the confirmation step without submitting.
    ///
    /// # Errors
    ///
    /// [`OrderError::InvalidTransition`] unless the session is `Confirming`.
    pub fn close_modal(&mut self) -> Result<()> {
        self.require(Phase::Confirming, "close the order summary")?;
        self.confirming = false;
        Ok(())
    }
}
