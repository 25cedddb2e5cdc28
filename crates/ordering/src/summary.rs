//! Order summary projections.
//!
//! A summary is a frozen copy of the cart and its totals, built when the
//! customer reviews the order and rebuilt when they confirm it.

use chrono::{DateTime, Utc};
use makcik_core::{Amount, Cart, CustomerRecord, OrderLineItem, OrderType};
use serde::Serialize;
use uuid::Uuid;

/// Subtotal, delivery fee and grand total for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub subtotal: Amount,
    pub delivery_fee: Amount,
    pub grand_total: Amount,
}

impl Totals {
    #[must_use]
    pub fn compute(cart: &Cart, order_type: OrderType, flat_fee: Amount) -> Self {
        let subtotal = cart.subtotal();
        let delivery_fee = order_type.delivery_fee(flat_fee);
        Self {
            subtotal,
            delivery_fee,
            grand_total: subtotal + delivery_fee,
        }
    }
}

/// One itemized line of a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Amount,
    pub line_total: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&OrderLineItem> for SummaryLine {
    fn from(item: &OrderLineItem) -> Self {
        Self {
            name: item.name().to_owned(),
            quantity: item.quantity(),
            unit_price: item.unit_price(),
            line_total: item.line_total(),
            notes: item.notes().map(str::to_owned),
        }
    }
}

/// Everything shown in the confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub customer: CustomerRecord,
    pub lines: Vec<SummaryLine>,
    pub order_type: OrderType,
    #[serde(flatten)]
    pub totals: Totals,
}

impl OrderSummary {
    #[must_use]
    pub fn compute(
        customer: &CustomerRecord,
        cart: &Cart,
        order_type: OrderType,
        flat_fee: Amount,
    ) -> Self {
        Self {
            customer: customer.clone(),
            lines: cart.items().iter().map(SummaryLine::from).collect(),
            order_type,
            totals: Totals::compute(cart, order_type, flat_fee),
        }
    }
}

/// An order handed off to the restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedOrder {
    /// Reference shown to the customer.
    pub reference: Uuid,
    pub submitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: OrderSummary,
}

impl SubmittedOrder {
    /// Stamp a summary with a fresh reference and the current time.
    #[must_use]
    pub fn stamp(summary: OrderSummary) -> Self {
        Self {
            reference: Uuid::new_v4(),
            submitted_at: Utc::now(),
            summary,
        }
    }

    #[must_use]
    pub const fn grand_total(&self) -> Amount {
        self.summary.totals.grand_total
    }

    /// First segment of the reference, for display.
    #[must_use]
    pub fn short_reference(&self) -> String {
        self.reference
            .simple()
            .to_string()
            .chars()
            .take(8)
            .collect::<String>()
            .to_uppercase()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use makcik_core::{DEFAULT_MAX_QUANTITY, LineItemDraft, RegistrationForm};

    use super::*;

    fn customer() -> CustomerRecord {
        RegistrationForm {
            first_name: "Ana".to_string(),
            last_name: "Cruz".to_string(),
            email: "ana@example.com".to_string(),
            phone: "09171234567".to_string(),
            address: "12 Mabini Street".to_string(),
        }
        .validate()
        .unwrap()
    }

    fn cart() -> Cart {
        let mut cart = Cart::new();
        for draft in [
            LineItemDraft::new("Nasi Lemak", 100, 2).with_notes("no egg"),
            LineItemDraft::new("Teh Tarik", 50, 1),
        ] {
            cart.push(draft.into_line_item(DEFAULT_MAX_QUANTITY).unwrap());
        }
        cart
    }

    #[test]
    fn test_summary_itemizes_and_totals() {
        let summary = OrderSummary::compute(&customer(), &cart(), OrderType::Delivery, Amount::new(50));

        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].line_total, Amount::new(200));
        assert_eq!(summary.lines[0].notes.as_deref(), Some("no egg"));
        assert_eq!(
            summary.totals,
            Totals {
                subtotal: Amount::new(250),
                delivery_fee: Amount::new(50),
                grand_total: Amount::new(300),
            }
        );
    }

    #[test]
    fn test_pickup_has_no_fee() {
        let totals = Totals::compute(&cart(), OrderType::Pickup, Amount::new(50));
        assert_eq!(totals.delivery_fee, Amount::ZERO);
        assert_eq!(totals.grand_total, Amount::new(250));
    }

    #[test]
    fn test_submitted_order_json() {
        let summary = OrderSummary::compute(&customer(), &cart(), OrderType::Pickup, Amount::new(50));
        let order = SubmittedOrder::stamp(summary);
        assert_eq!(order.short_reference().len(), 8);

        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["grand_total"], 250);
        assert_eq!(json["order_type"], "pickup");
        assert_eq!(json["customer"]["first_name"], "Ana");
        assert_eq!(json["lines"][1]["name"], "Teh Tarik");
    }
}
