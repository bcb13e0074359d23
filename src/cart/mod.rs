//! Cart
//!
//! The cart is the single source of truth for what the customer is about to order and how it
//! will be fulfilled. Every mutation lives in this module; none of them fail. Inputs a caller
//! should never send (a zero quantity, a non-positive price, an unknown id) leave the cart
//! untouched.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::menu::models::{LocationId, MenuItemId};

mod line_item;
mod store;

pub use line_item::{LineItem, NewLineItem};
pub use store::{CART_STORAGE_KEY, CartStore};

/// How the order will be fulfilled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Collected from a pickup location.
    #[default]
    Pickup,

    /// Delivered to the customer.
    Delivery,
}

impl OrderType {
    /// Wire name
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

/// Unrecognised order type name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order type: {0}")]
pub struct ParseOrderTypeError(String);

impl FromStr for OrderType {
    type Err = ParseOrderTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "pickup" => Ok(Self::Pickup),
            "delivery" => Ok(Self::Delivery),
            _ => Err(ParseOrderTypeError(value.to_string())),
        }
    }
}

/// Cart state: line items plus the ordering context.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CartSnapshot")]
pub struct Cart {
    items: Vec<LineItem>,
    selected_location_id: Option<LocationId>,
    order_type: OrderType,
}

impl Cart {
    /// Create an empty pickup cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of an item, merging into an existing line with the same id.
    ///
    /// A zero quantity or a price that is not positive is ignored.
    pub fn add_item(&mut self, item: NewLineItem, quantity: u32) {
        if quantity == 0 {
            debug!(id = %item.id, "ignoring add with zero quantity");

            return;
        }

        if item.price <= Decimal::ZERO {
            debug!(id = %item.id, price = %item.price, "ignoring add with non-positive price");

            return;
        }

        if let Some(line) = self.line_mut(&item.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.items.push(LineItem::new(item, quantity));
        }
    }

    /// Set a line's quantity exactly. Anything below one removes the line; unknown ids are ignored.
    pub fn update_quantity(&mut self, id: &MenuItemId, quantity: u32) {
        if quantity < 1 {
            self.remove_item(id);

            return;
        }

        if let Some(line) = self.line_mut(id) {
            line.quantity = quantity;
        }
    }

    /// Reduce a line's quantity by one, removing it when it reaches zero.
    pub fn decrement_item(&mut self, id: &MenuItemId) {
        if let Some(quantity) = self.quantity_of(id) {
            self.update_quantity(id, quantity - 1);
        }
    }

    /// Remove a line if present.
    pub fn remove_item(&mut self, id: &MenuItemId) {
        self.items.retain(|line| line.id() != id);
    }

    /// Remove every line. The order type and pickup location are kept.
    pub fn clear_cart(&mut self) {
        self.items.clear();
    }

    /// Set the fulfilment type. The pickup location is left as it is.
    pub fn set_order_type(&mut self, order_type: OrderType) {
        self.order_type = order_type;
    }

    /// Bind (or unbind) the pickup location.
    pub fn set_selected_location_id(&mut self, location: Option<LocationId>) {
        self.selected_location_id = location;
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Look up a line by menu item id.
    #[must_use]
    pub fn get(&self, id: &MenuItemId) -> Option<&LineItem> {
        self.items.iter().find(|line| line.id() == id)
    }

    /// Quantity of an item, if it is in the cart.
    #[must_use]
    pub fn quantity_of(&self, id: &MenuItemId) -> Option<u32> {
        self.get(id).map(LineItem::quantity)
    }

    /// Σ(price × quantity), computed on every call.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Same as [`Cart::total`]; checkout adds tax on top of this.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.total()
    }

    /// Σ quantity
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Selected pickup location
    #[must_use]
    pub fn selected_location_id(&self) -> Option<&LocationId> {
        self.selected_location_id.as_ref()
    }

    /// Fulfilment type
    #[must_use]
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    fn line_mut(&mut self, id: &MenuItemId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|line| line.id() == id)
    }
}

/// Persisted cart shape. Loading normalises it so a stored cart cannot break the invariants.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CartSnapshot {
    #[serde(default)]
    items: Vec<LineItem>,
    #[serde(default)]
    selected_location_id: Option<LocationId>,
    #[serde(default)]
    order_type: OrderType,
}

impl From<CartSnapshot> for Cart {
    fn from(snapshot: CartSnapshot) -> Self {
        let mut items: Vec<LineItem> = Vec::with_capacity(snapshot.items.len());

        for line in snapshot.items {
            if line.quantity() == 0
                || line.price() <= Decimal::ZERO
                || items.iter().any(|kept| kept.id() == line.id())
            {
                debug!(id = %line.id(), "dropping invalid persisted cart line");

                continue;
            }

            items.push(line);
        }

        Self {
            items,
            selected_location_id: snapshot.selected_location_id,
            order_type: snapshot.order_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn momo() -> NewLineItem {
        item("42", "Momo", 10)
    }

    fn item(id: &str, name: &str, price: i64) -> NewLineItem {
        NewLineItem {
            id: MenuItemId::new(id),
            name: name.to_string(),
            description: String::new(),
            price: Decimal::from(price),
            category: "Momo".to_string(),
            image: None,
            vegetarian: None,
        }
    }

    fn id(value: &str) -> MenuItemId {
        MenuItemId::new(value)
    }

    #[test]
    fn add_to_empty_cart() {
        let mut cart = Cart::new();

        cart.add_item(momo(), 1);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of(&id("42")), Some(1));
        assert_eq!(cart.total(), Decimal::from(10));
    }

    #[test]
    fn adding_existing_item_increments_quantity() {
        let mut cart = Cart::new();

        cart.add_item(momo(), 1);
        cart.add_item(momo(), 2);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of(&id("42")), Some(3));
        assert_eq!(cart.total(), Decimal::from(30));
    }

    #[test]
    fn adding_keeps_the_first_snapshot() {
        let mut cart = Cart::new();

        cart.add_item(momo(), 1);
        cart.add_item(item("42", "Renamed", 99), 1);

        let line = cart.get(&id("42"));

        assert_eq!(line.map(LineItem::name), Some("Momo"));
        assert_eq!(cart.total(), Decimal::from(20));
    }

    #[test]
    fn adding_zero_is_ignored() {
        let mut cart = Cart::new();

        cart.add_item(momo(), 0);

        assert!(cart.is_empty());
    }

    #[test]
    fn adding_a_non_positive_price_is_ignored() {
        let mut cart = Cart::new();

        cart.add_item(item("7", "Free water", 0), 1);
        cart.add_item(item("8", "Discount", -5), 2);

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);

        cart.add_item(momo(), 1);
        cart.add_item(item("42", "Momo", 0), 1);

        assert_eq!(cart.quantity_of(&id("42")), Some(1));
    }

    #[test]
    fn update_to_zero_removes_line() {
        let mut cart = Cart::new();

        cart.add_item(momo(), 3);
        cart.update_quantity(&id("42"), 0);

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn update_sets_quantity_exactly() {
        let mut cart = Cart::new();

        cart.add_item(momo(), 3);
        cart.update_quantity(&id("42"), 5);

        assert_eq!(cart.quantity_of(&id("42")), Some(5));
        assert_eq!(cart.total(), Decimal::from(50));
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(momo(), 1);

        let before = cart.clone();
        cart.update_quantity(&id("missing"), 4);

        assert_eq!(cart, before);
    }

    #[test]
    fn decrement_removes_at_zero() {
        let mut cart = Cart::new();

        cart.add_item(momo(), 2);
        cart.decrement_item(&id("42"));

        assert_eq!(cart.quantity_of(&id("42")), Some(1));

        cart.decrement_item(&id("42"));

        assert!(cart.is_empty());

        cart.decrement_item(&id("42"));

        assert!(cart.is_empty());
    }

    #[test]
    fn two_distinct_items_total() {
        let mut cart = Cart::new();

        cart.add_item(item("1", "Momo", 10), 2);
        cart.add_item(item("2", "Chowmein", 15), 1);

        assert_eq!(cart.total(), Decimal::from(35));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn clear_keeps_ordering_context() {
        let mut cart = Cart::new();

        cart.add_item(momo(), 1);
        cart.set_order_type(OrderType::Delivery);
        cart.set_selected_location_id(Some(LocationId::new("7")));
        cart.clear_cart();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
        assert_eq!(cart.order_type(), OrderType::Delivery);
        assert_eq!(cart.selected_location_id(), Some(&LocationId::new("7")));
    }

    #[test]
    fn switching_to_delivery_keeps_location() {
        let mut cart = Cart::new();

        cart.set_selected_location_id(Some(LocationId::new("7")));
        cart.set_order_type(OrderType::Delivery);

        assert_eq!(cart.selected_location_id(), Some(&LocationId::new("7")));
    }

    #[test]
    fn order_type_defaults_to_pickup() {
        assert_eq!(Cart::new().order_type(), OrderType::Pickup);
    }

    #[test]
    fn order_type_parses_case_insensitively() -> TestResult {
        assert_eq!("Delivery".parse::<OrderType>()?, OrderType::Delivery);
        assert_eq!("pickup".parse::<OrderType>()?, OrderType::Pickup);
        assert!("dine-in".parse::<OrderType>().is_err());

        Ok(())
    }

    #[test]
    fn persisted_shape_round_trips() -> TestResult {
        let mut cart = Cart::new();

        cart.add_item(momo(), 2);
        cart.set_selected_location_id(Some(LocationId::new("7")));

        let json = serde_json::to_string(&cart)?;
        let restored: Cart = serde_json::from_str(&json)?;

        assert_eq!(restored, cart);
        assert!(json.contains("\"orderType\":\"pickup\""), "json: {json}");
        assert!(json.contains("\"selectedLocationId\":\"7\""), "json: {json}");

        Ok(())
    }

    #[test]
    fn loading_drops_zero_quantity_and_duplicate_lines() -> TestResult {
        let cart: Cart = serde_json::from_str(
            r#"{
                "items": [
                    {"id": "1", "name": "Momo", "price": 10, "quantity": 2},
                    {"id": "2", "name": "Tea", "price": 2.5, "quantity": 0},
                    {"id": "1", "name": "Momo again", "price": 10, "quantity": 5},
                    {"id": "3", "name": "Refund", "price": -5, "quantity": 2},
                    {"id": "4", "name": "Freebie", "price": 0, "quantity": 1}
                ],
                "orderType": "delivery"
            }"#,
        )?;

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.quantity_of(&id("1")), Some(2));
        assert_eq!(cart.total(), Decimal::from(20));
        assert_eq!(cart.order_type(), OrderType::Delivery);
        assert_eq!(cart.selected_location_id(), None);

        Ok(())
    }
}
