//! Menu catalog.
//!
//! The order form offers a placeholder option followed by every menu item.
//! Menus are plain serde data so front ends can load them from YAML or JSON.

use serde::{Deserialize, Serialize};

use super::amount::Amount;
use super::line_item::LineItemDraft;

/// A dish on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub price: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MenuItem {
    #[must_use]
    pub fn new(name: impl Into<String>, price: Amount) -> Self {
        Self {
            name: name.into(),
            price,
            description: None,
        }
    }

    /// Draft line for `quantity` of this dish, or `None` if the price is
    /// beyond what a line item can carry.
    #[must_use]
    pub fn draft(&self, quantity: i64) -> Option<LineItemDraft> {
        let price = self.unit_price()?;
        Some(LineItemDraft::new(self.name.clone(), price, quantity))
    }

    fn unit_price(&self) -> Option<i64> {
        i64::try_from(self.price.units()).ok()
    }
}

/// The restaurant's menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Menu {
    pub items: Vec<MenuItem>,
}

impl Menu {
    #[must_use]
    pub const fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// Look up a dish by name (case-insensitive, surrounding whitespace ignored).
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&MenuItem> {
        let name = name.trim();
        self.items
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(name))
    }

    /// Look up a dish by its 1-based position in the selector.
    #[must_use]
    pub fn nth(&self, position: usize) -> Option<&MenuItem> {
        position.checked_sub(1).and_then(|i| self.items.get(i))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Problems that would make the menu unusable. Empty when valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.items.is_empty() {
            errors.push("menu has no items".to_string());
        }

        for (index, item) in self.items.iter().enumerate() {
            if item.name.trim().is_empty() {
                errors.push(format!("item {} has an empty name", index + 1));
                continue;
            }
            let duplicate = self
                .items
                .iter()
                .take(index)
                .any(|earlier| earlier.name.eq_ignore_ascii_case(&item.name));
            if duplicate {
                errors.push(format!("duplicate item: {}", item.name));
            }
            if item.unit_price().is_none() {
                errors.push(format!(
                    "price out of range for {}: {}",
                    item.name,
                    item.price.units()
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn menu() -> Menu {
        Menu::new(vec![
            MenuItem::new("Nasi Lemak", Amount::new(120)),
            MenuItem::new("Teh Tarik", Amount::new(45)),
        ])
    }

    #[test]
    fn test_find_ignores_case() {
        let menu = menu();
        assert_eq!(menu.find(" teh tarik ").unwrap().price, Amount::new(45));
        assert!(menu.find("Laksa").is_none());
    }

    #[test]
    fn test_nth_is_one_based() {
        let menu = menu();
        assert!(menu.nth(0).is_none());
        assert_eq!(menu.nth(1).unwrap().name, "Nasi Lemak");
        assert!(menu.nth(3).is_none());
    }

    #[test]
    fn test_validate() {
        assert!(menu().validate().is_empty());

        let mut bad = menu();
        bad.items.push(MenuItem::new("NASI LEMAK", Amount::new(1)));
        bad.items.push(MenuItem::new(" ", Amount::new(1)));
        assert_eq!(
            bad.validate(),
            vec![
                "duplicate item: NASI LEMAK".to_string(),
                "item 4 has an empty name".to_string(),
            ]
        );
        assert_eq!(Menu::default().validate(), vec!["menu has no items"]);
    }

    #[test]
    fn test_yaml() {
        let yaml = "items:\n  - name: Roti Canai\n    price: 60\n";
        let menu: Menu = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(menu.items, vec![MenuItem::new("Roti Canai", Amount::new(60))]);

        let negative = "items:\n  - name: Roti Canai\n    price: -60\n";
        assert!(serde_yaml::from_str::<Menu>(negative).is_err());
    }

    #[test]
    fn test_draft() {
        let draft = menu().items.first().unwrap().draft(2);
        assert_eq!(draft, Some(LineItemDraft::new("Nasi Lemak", 120, 2)));

        let huge = MenuItem::new("Wagyu", Amount::new(u64::MAX));
        assert_eq!(huge.draft(1), None);
    }

    #[test]
    fn test_validate_rejects_unrepresentable_price() {
        let mut menu = menu();
        menu.items.push(MenuItem::new("Wagyu", Amount::new(u64::MAX)));
        assert_eq!(
            menu.validate(),
            vec![format!("price out of range for Wagyu: {}", u64::MAX)]
        );

        let mut edge = Menu::default();
        edge.items
            .push(MenuItem::new("Edge", Amount::new(i64::MAX.unsigned_abs())));
        assert!(edge.validate().is_empty());
    }
}
