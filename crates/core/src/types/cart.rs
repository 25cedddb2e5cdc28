//! The shopping cart and its arithmetic.

use serde::Serialize;

use super::amount::Amount;
use super::line_item::OrderLineItem;
use super::order_type::OrderType;

/// Ordered list of line items.
///
/// Lines keep insertion order and are never merged, so adding the same dish
/// twice yields two lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<OrderLineItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a line.
    pub fn push(&mut self, item: OrderLineItem) {
        self.items.push(item);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn items(&self) -> &[OrderLineItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of dishes across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity())).sum()
    }

    /// Sum of line totals; zero when empty.
    #[must_use]
    pub fn subtotal(&self) -> Amount {
        subtotal(&self.items)
    }

    /// Subtotal plus the delivery fee for `order_type`.
    #[must_use]
    pub fn grand_total(&self, order_type: OrderType, flat_fee: Amount) -> Amount {
        grand_total(&self.items, order_type, flat_fee)
    }
}

/// `unit_price × quantity`.
#[must_use]
pub fn line_total(item: &OrderLineItem) -> Amount {
    item.line_total()
}

#[must_use]
pub fn subtotal(items: &[OrderLineItem]) -> Amount {
    items.iter().map(line_total).sum()
}

#[must_use]
pub fn grand_total(items: &[OrderLineItem], order_type: OrderType, flat_fee: Amount) -> Amount {
    subtotal(items) + order_type.delivery_fee(flat_fee)
}
