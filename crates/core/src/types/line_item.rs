//! Order line items.

use serde::{Deserialize, Serialize};

use super::amount::Amount;

/// Default upper bound on a single line's quantity.
pub const DEFAULT_MAX_QUANTITY: u32 = 99;

/// Errors that can occur when turning a [`LineItemDraft`] into an
/// [`OrderLineItem`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineItemError {
    /// No menu item was chosen (the placeholder option).
    #[error("no item selected")]
    InvalidSelection,
    /// Quantity outside `1..=max`.
    #[error("quantity must be between 1 and {max}, got {quantity}")]
    InvalidQuantity {
        /// The rejected quantity.
        quantity: i64,
        /// Largest accepted quantity.
        max: u32,
    },
    /// Negative or oversized unit price.
    #[error("unit price must be a non-negative whole amount, got {0}")]
    InvalidPrice(i64),
}

/// Raw add-to-order input as parsed from the order form.
///
/// Numbers are signed because nothing upstream guarantees their sign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemDraft {
    pub name: String,
    pub unit_price: i64,
    pub quantity: i64,
    pub notes: Option<String>,
}

impl LineItemDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, unit_price: i64, quantity: i64) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
            notes: None,
        }
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Check bounds and build the line item.
    ///
    /// # Errors
    ///
    /// - [`LineItemError::InvalidSelection`] if the name is blank
    /// - [`LineItemError::InvalidQuantity`] if the quantity is outside `1..=max_quantity`
    /// - [`LineItemError::InvalidPrice`] if the unit price is negative
    pub fn into_line_item(self, max_quantity: u32) -> Result<OrderLineItem, LineItemError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(LineItemError::InvalidSelection);
        }

        let quantity = u32::try_from(self.quantity)
            .ok()
            .filter(|q| (1..=max_quantity).contains(q))
            .ok_or(LineItemError::InvalidQuantity {
                quantity: self.quantity,
                max: max_quantity,
            })?;

        let unit_price =
            u64::try_from(self.unit_price).map_err(|_| LineItemError::InvalidPrice(self.unit_price))?;

        let notes = self
            .notes
            .map(|n| n.trim().to_owned())
            .filter(|n| !n.is_empty());

        Ok(OrderLineItem {
            name: name.to_owned(),
            unit_price: Amount::new(unit_price),
            quantity,
            notes,
        })
    }
}

/// One ordered dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLineItem {
    name: String,
    unit_price: Amount,
    quantity: u32,
    notes: Option<String>,
}

impl OrderLineItem {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn unit_price(&self) -> Amount {
        self.unit_price
    }

    /// Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Amount {
        self.unit_price.times(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_into_line_item() {
        let item = LineItemDraft::new("Nasi Lemak", 120, 2)
            .with_notes("extra sambal")
            .into_line_item(DEFAULT_MAX_QUANTITY)
            .unwrap();

        assert_eq!(item.name(), "Nasi Lemak");
        assert_eq!(item.unit_price(), Amount::new(120));
        assert_eq!(item.quantity(), 2);
        assert_eq!(item.notes(), Some("extra sambal"));
        assert_eq!(item.line_total(), Amount::new(240));
    }

    #[test]
    fn test_blank_name_is_invalid_selection() {
        for name in ["", "   "] {
            assert_eq!(
                LineItemDraft::new(name, 100, 1).into_line_item(DEFAULT_MAX_QUANTITY),
                Err(LineItemError::InvalidSelection)
            );
        }
    }

    #[test]
    fn test_quantity_bounds() {
        for quantity in [0, -1, 100] {
            assert!(matches!(
                LineItemDraft::new("Teh Tarik", 45, quantity).into_line_item(DEFAULT_MAX_QUANTITY),
                Err(LineItemError::InvalidQuantity { .. })
            ));
        }
        assert!(
            LineItemDraft::new("Teh Tarik", 45, 99)
                .into_line_item(DEFAULT_MAX_QUANTITY)
                .is_ok()
        );
    }

    #[test]
    fn test_negative_price() {
        assert_eq!(
            LineItemDraft::new("Teh Tarik", -45, 1).into_line_item(DEFAULT_MAX_QUANTITY),
            Err(LineItemError::InvalidPrice(-45))
        );
    }

    #[test]
    fn test_free_item_allowed() {
        let item = LineItemDraft::new("Water", 0, 3)
            .into_line_item(DEFAULT_MAX_QUANTITY)
            .unwrap();
        assert_eq!(item.line_total(), Amount::ZERO);
    }

    #[test]
    fn test_blank_notes_dropped() {
        let item = LineItemDraft::new("Roti Canai", 60, 1)
            .with_notes("  ")
            .into_line_item(DEFAULT_MAX_QUANTITY)
            .unwrap();
        assert_eq!(item.notes(), None);
    }
}
