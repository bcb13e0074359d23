//! Cart Line Items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::menu::models::{CategoryLookup, MenuItem, MenuItemId};

/// An item as offered to [`Cart::add_item`](super::Cart::add_item): the catalog snapshot without a
/// quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLineItem {
    /// Menu item id
    pub id: MenuItemId,

    /// Display name
    pub name: String,

    /// Display copy
    pub description: String,

    /// Unit price at add-time
    pub price: Decimal,

    /// Category id or display name
    pub category: String,

    /// Image URL
    pub image: Option<String>,

    /// Vegetarian flag
    pub vegetarian: Option<bool>,
}

impl NewLineItem {
    /// Snapshot a catalog item, resolving its category to a display name.
    #[must_use]
    pub fn from_menu_item(item: &MenuItem, categories: &CategoryLookup) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
            category: categories.resolve(&item.category).to_string(),
            image: item.image.clone(),
            vegetarian: Some(item.is_vegetarian),
        }
    }
}

/// A line in the cart. Quantity is always at least one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    id: MenuItemId,
    name: String,
    #[serde(default)]
    description: String,
    price: Decimal,
    #[serde(default)]
    category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vegetarian: Option<bool>,
    pub(super) quantity: u32,
}

impl LineItem {
    pub(super) fn new(item: NewLineItem, quantity: u32) -> Self {
        let NewLineItem {
            id,
            name,
            description,
            price,
            category,
            image,
            vegetarian,
        } = item;

        Self {
            id,
            name,
            description,
            price,
            category,
            image,
            vegetarian,
            quantity,
        }
    }

    /// Menu item id
    #[must_use]
    pub fn id(&self) -> &MenuItemId {
        &self.id
    }

    /// Display name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display copy
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Unit price captured at add-time
    #[must_use]
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Category id or display name
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Image URL
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Vegetarian flag
    #[must_use]
    pub fn vegetarian(&self) -> Option<bool> {
        self.vegetarian
    }

    /// Quantity, never zero
    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// `price × quantity`
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use crate::menu::models::{Category, CategoryId};

    use super::*;

    #[test]
    fn snapshot_resolves_category_name() {
        let categories = [Category {
            id: CategoryId::new("1"),
            name: "Momo".to_string(),
            description: None,
        }];

        let item = MenuItem {
            id: MenuItemId::new("42"),
            name: "Momo".to_string(),
            description: "Steamed".to_string(),
            price: Decimal::new(10, 0),
            category: "1".to_string(),
            image: None,
            is_vegetarian: false,
            is_popular: true,
            is_spicy: false,
            is_available: None,
        };

        let line = NewLineItem::from_menu_item(&item, &CategoryLookup::new(&categories));

        assert_eq!(line.category, "Momo");
        assert_eq!(line.vegetarian, Some(false));
        assert_eq!(line.price, Decimal::new(10, 0));
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let line = LineItem::new(
            NewLineItem {
                id: MenuItemId::new("1"),
                name: "Tea".to_string(),
                description: String::new(),
                price: Decimal::new(25, 1),
                category: "Drinks".to_string(),
                image: None,
                vegetarian: None,
            },
            3,
        );

        assert_eq!(line.line_total(), Decimal::new(75, 1));
    }
}
