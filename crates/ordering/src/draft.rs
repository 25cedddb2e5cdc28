//! Contents of the add-to-order form.

use makcik_core::{Amount, LineItemDraft, MenuItem};
use serde::Serialize;

/// What the customer has selected but not yet added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderDraft {
    /// `None` while the placeholder option is selected.
    pub selection: Option<MenuItem>,
    pub quantity: i64,
    pub notes: String,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            selection: None,
            quantity: 1,
            notes: String::new(),
        }
    }
}

impl OrderDraft {
    /// Price × quantity of the current selection.
    ///
    /// Zero while the placeholder is selected or the quantity is not positive.
    #[must_use]
    pub fn preview_total(&self) -> Amount {
        match (&self.selection, u32::try_from(self.quantity)) {
            (Some(item), Ok(quantity)) => item.price.times(quantity),
            _ => Amount::ZERO,
        }
    }

    /// The line this form would add, or `None` for the placeholder or a dish
    /// whose price cannot be ordered.
    #[must_use]
    pub fn to_line_draft(&self) -> Option<LineItemDraft> {
        let item = self.selection.as_ref()?;
        let mut draft = item.draft(self.quantity)?;
        if !self.notes.trim().is_empty() {
            draft = draft.with_notes(self.notes.clone());
        }
        Some(draft)
    }

    /// Back to the placeholder, quantity 1, no notes.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn teh_tarik() -> MenuItem {
        MenuItem::new("Teh Tarik", Amount::new(45))
    }

    #[test]
    fn test_preview_total() {
        let mut draft = OrderDraft::default();
        assert_eq!(draft.preview_total(), Amount::ZERO);

        draft.selection = Some(teh_tarik());
        assert_eq!(draft.preview_total(), Amount::new(45));

        draft.quantity = 3;
        assert_eq!(draft.preview_total(), Amount::new(135));

        draft.quantity = -2;
        assert_eq!(draft.preview_total(), Amount::ZERO);
    }

    #[test]
    fn test_to_line_draft() {
        let mut draft = OrderDraft::default();
        assert!(draft.to_line_draft().is_none());

        draft.selection = Some(teh_tarik());
        draft.quantity = 2;
        draft.notes = "less sugar".to_string();
        assert_eq!(
            draft.to_line_draft().unwrap(),
            LineItemDraft::new("Teh Tarik", 45, 2).with_notes("less sugar")
        );
    }

    #[test]
    fn test_to_line_draft_unorderable_price() {
        let draft = OrderDraft {
            selection: Some(MenuItem::new("Wagyu", Amount::new(u64::MAX))),
            quantity: 1,
            notes: String::new(),
        };
        assert!(draft.to_line_draft().is_none());
    }

    #[test]
    fn test_reset() {
        let mut draft = OrderDraft {
            selection: Some(teh_tarik()),
            quantity: 4,
            notes: "hot".to_string(),
        };
        draft.reset();
        assert_eq!(draft, OrderDraft::default());
    }
}
