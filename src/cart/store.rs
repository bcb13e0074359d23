//! Cart Store

use tracing::{debug, warn};

use crate::{
    cart::{Cart, NewLineItem, OrderType},
    menu::models::{LocationId, MenuItemId},
    storage::{StateStorage, load_state, save_state},
};

/// Storage key for the persisted cart.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Session-scoped cart container. Mutations go through the store so every change is written back
/// to storage.
#[derive(Debug)]
pub struct CartStore<S: StateStorage> {
    cart: Cart,
    storage: S,
}

impl<S: StateStorage> CartStore<S> {
    /// Rehydrate the cart from `storage`, starting empty when nothing usable is stored.
    pub fn open(storage: S) -> Self {
        let cart = match load_state::<Cart, _>(&storage, CART_STORAGE_KEY) {
            Ok(Some(cart)) => {
                debug!(lines = cart.items().len(), "rehydrated cart");

                cart
            }
            Ok(None) => Cart::new(),
            Err(source) => {
                warn!("discarding unreadable persisted cart: {source}");

                Cart::new()
            }
        };

        Self { cart, storage }
    }

    /// Current cart state
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// See [`Cart::add_item`].
    pub fn add_item(&mut self, item: NewLineItem, quantity: u32) {
        self.mutate(|cart| cart.add_item(item, quantity));
    }

    /// See [`Cart::update_quantity`].
    pub fn update_quantity(&mut self, id: &MenuItemId, quantity: u32) {
        self.mutate(|cart| cart.update_quantity(id, quantity));
    }

    /// See [`Cart::decrement_item`].
    pub fn decrement_item(&mut self, id: &MenuItemId) {
        self.mutate(|cart| cart.decrement_item(id));
    }

    /// See [`Cart::remove_item`].
    pub fn remove_item(&mut self, id: &MenuItemId) {
        self.mutate(|cart| cart.remove_item(id));
    }

    /// See [`Cart::clear_cart`].
    pub fn clear_cart(&mut self) {
        self.mutate(Cart::clear_cart);
    }

    /// See [`Cart::set_order_type`].
    pub fn set_order_type(&mut self, order_type: OrderType) {
        self.mutate(|cart| cart.set_order_type(order_type));
    }

    /// See [`Cart::set_selected_location_id`].
    pub fn set_selected_location_id(&mut self, location: Option<LocationId>) {
        self.mutate(|cart| cart.set_selected_location_id(location));
    }

    /// Borrow the backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn mutate(&mut self, f: impl FnOnce(&mut Cart)) {
        f(&mut self.cart);

        if let Err(source) = save_state(&self.storage, CART_STORAGE_KEY, &self.cart) {
            warn!("failed to persist cart: {source}");
        }
    }
}
