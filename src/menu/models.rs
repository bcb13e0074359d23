//! Catalog Models

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::ids::TypedId;

/// Menu item id
pub type MenuItemId = TypedId<MenuItem>;

/// Category id
pub type CategoryId = TypedId<Category>;

/// Location id
pub type LocationId = TypedId<Location>;

/// Delivery service id
pub type DeliveryServiceId = TypedId<DeliveryService>;

/// A menu item as served by the catalog endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Item id
    pub id: MenuItemId,

    /// Display name
    pub name: String,

    /// Display copy
    #[serde(default)]
    pub description: String,

    /// Unit price
    pub price: Decimal,

    /// Category id or category display name, depending on the endpoint.
    pub category: String,

    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Vegetarian flag
    #[serde(default)]
    pub is_vegetarian: bool,

    /// Popular flag
    #[serde(default)]
    pub is_popular: bool,

    /// Spicy flag
    #[serde(default)]
    pub is_spicy: bool,

    /// Availability; only an explicit `false` hides the item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

/// A menu category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Category id
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Display copy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A pickup location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Location id
    pub id: LocationId,

    /// Display name
    pub name: String,

    /// Street address
    #[serde(default)]
    pub address: String,

    /// Contact number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Whether the location is taking orders.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

/// A third-party delivery service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryService {
    /// Delivery service id
    pub id: DeliveryServiceId,

    /// Display name
    pub name: String,

    /// Flat delivery fee, when the service advertises one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<Decimal>,

    /// Whether the service is currently offered.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Resolves an item's `category` field, which may hold a category id or its display name.
#[derive(Debug, Clone, Default)]
pub struct CategoryLookup {
    names: FxHashMap<String, String>,
}

impl CategoryLookup {
    /// Build a lookup table from the fetched categories.
    pub fn new<'a>(categories: impl IntoIterator<Item = &'a Category>) -> Self {
        let names = categories
            .into_iter()
            .map(|category| (category.id.as_str().to_string(), category.name.clone()))
            .collect();

        Self { names }
    }

    /// The display name for a category reference. Unknown references are taken to already be a
    /// display name.
    #[must_use]
    pub fn resolve<'a>(&'a self, reference: &'a str) -> &'a str {
        self.names.get(reference).map_or(reference, String::as_str)
    }
}
