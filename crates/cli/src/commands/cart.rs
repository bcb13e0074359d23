//! Cart commands

use std::io;

use clap::Subcommand;
use rusty_money::iso::Currency;
use saffron::{
    auth::AuthSession,
    bill::write_bill,
    cart::{CartStore, NewLineItem, OrderType},
    checkout::CheckoutSummary,
    menu::MenuItemId,
    money::format_amount,
    routes::Route,
    storage::StateStorage,
};
use saffron_client::{MenuApi, MenuCatalog};
use tracing::info;

use crate::{commands::require, errors::CliError};

/// Cart subcommands.
#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart with its bill
    Show,

    /// Add a menu item
    Add {
        /// Menu item id
        item_id: String,

        /// Units to add
        #[arg(long, short, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },

    /// Set a line's quantity; zero removes the line
    Update {
        /// Menu item id
        item_id: String,

        /// New quantity
        quantity: u32,
    },

    /// Take one unit off a line
    Decrement {
        /// Menu item id
        item_id: String,
    },

    /// Remove a line
    Remove {
        /// Menu item id
        item_id: String,
    },

    /// Empty the cart
    Clear,
}

pub(crate) async fn run<S: StateStorage, A: MenuApi>(
    command: CartCommand,
    store: &mut CartStore<S>,
    catalog: &MenuCatalog<A>,
    session: &AuthSession,
    currency: &'static Currency,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    match command {
        CartCommand::Show => {
            require(Route::Cart, session)?;

            return show(store, currency, out);
        }
        CartCommand::Add { item_id, quantity } => {
            let id = MenuItemId::new(item_id);
            let items = catalog.menu_items().await?;

            let Some(item) = items.iter().find(|item| item.id == id) else {
                return Err(CliError::UnknownMenuItem(id.into_string()));
            };

            if item.is_available == Some(false) {
                return Err(CliError::Unavailable(item.name.clone()));
            }

            let lookup = catalog.category_lookup().await?;

            store.add_item(NewLineItem::from_menu_item(item, &lookup), quantity);

            info!(item = %id, quantity, "added to cart");

            writeln!(out, "Added {quantity} x {}", item.name)?;
        }
        CartCommand::Update { item_id, quantity } => {
            store.update_quantity(&MenuItemId::new(item_id), quantity);
        }
        CartCommand::Decrement { item_id } => {
            store.decrement_item(&MenuItemId::new(item_id));
        }
        CartCommand::Remove { item_id } => {
            store.remove_item(&MenuItemId::new(item_id));
        }
        CartCommand::Clear => {
            store.clear_cart();
        }
    }

    write_status(store, currency, out)
}

pub(crate) fn set_order_type<S: StateStorage>(
    store: &mut CartStore<S>,
    order_type: OrderType,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    store.set_order_type(order_type);

    writeln!(out, "Order type: {order_type}")?;

    Ok(())
}

fn show<S: StateStorage>(
    store: &CartStore<S>,
    currency: &'static Currency,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let cart = store.cart();

    if cart.is_empty() {
        writeln!(out, "Your cart is empty.")?;

        return Ok(());
    }

    let location = cart
        .selected_location_id()
        .map_or_else(|| "none".to_string(), ToString::to_string);

    writeln!(out, "Order type: {}  Location: {location}", cart.order_type())?;

    write_bill(out, cart, &CheckoutSummary::for_cart(cart), currency)?;

    Ok(())
}

fn write_status<S: StateStorage>(
    store: &CartStore<S>,
    currency: &'static Currency,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let cart = store.cart();

    writeln!(
        out,
        "Cart: {} item(s), {}",
        cart.item_count(),
        format_amount(cart.total(), currency)
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::NPR;
    use saffron::{
        auth::{Role, User, UserId},
        menu::MenuItem,
        storage::MemoryStorage,
    };
    use saffron_client::MockMenuApi;
    use testresult::TestResult;

    use super::*;

    fn momo(available: Option<bool>) -> MenuItem {
        MenuItem {
            id: MenuItemId::new("101"),
            name: "Chicken Momo".to_string(),
            description: String::new(),
            price: Decimal::from(250),
            category: "Momo".to_string(),
            image: None,
            is_vegetarian: false,
            is_popular: true,
            is_spicy: false,
            is_available: available,
        }
    }

    fn catalog(available: Option<bool>) -> MenuCatalog<MockMenuApi> {
        let mut api = MockMenuApi::new();

        api.expect_menu_items()
            .returning(move || Ok(vec![momo(available)]));
        api.expect_categories().returning(|| Ok(Vec::new()));

        MenuCatalog::new(api)
    }

    fn customer() -> AuthSession {
        AuthSession::new(
            User {
                id: UserId::new("u1"),
                name: "Asha".to_string(),
                role: Role::Customer,
                email: None,
                phone: Some("9800000000".to_string()),
            },
            "token",
        )
    }

    #[tokio::test]
    async fn add_snapshots_the_menu_item() -> TestResult {
        let mut store = CartStore::open(MemoryStorage::new());
        let mut out = Vec::new();

        run(
            CartCommand::Add {
                item_id: "101".to_string(),
                quantity: 2,
            },
            &mut store,
            &catalog(None),
            &AuthSession::default(),
            NPR,
            &mut out,
        )
        .await?;

        assert_eq!(store.cart().quantity_of(&MenuItemId::new("101")), Some(2));
        assert_eq!(store.cart().total(), Decimal::from(500));
        assert!(String::from_utf8(out)?.contains("Added 2 x Chicken Momo"));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_and_unavailable_items_are_rejected() {
        let mut store = CartStore::open(MemoryStorage::new());
        let mut out = Vec::new();

        let unknown = run(
            CartCommand::Add {
                item_id: "999".to_string(),
                quantity: 1,
            },
            &mut store,
            &catalog(None),
            &AuthSession::default(),
            NPR,
            &mut out,
        )
        .await;

        let sold_out = run(
            CartCommand::Add {
                item_id: "101".to_string(),
                quantity: 1,
            },
            &mut store,
            &catalog(Some(false)),
            &AuthSession::default(),
            NPR,
            &mut out,
        )
        .await;

        assert!(matches!(unknown, Err(CliError::UnknownMenuItem(id)) if id == "999"));
        assert!(matches!(sold_out, Err(CliError::Unavailable(_))));
        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn show_needs_a_customer_session() -> TestResult {
        let mut store = CartStore::open(MemoryStorage::new());
        let mut out = Vec::new();

        let anonymous = run(
            CartCommand::Show,
            &mut store,
            &catalog(None),
            &AuthSession::default(),
            NPR,
            &mut out,
        )
        .await;

        assert!(matches!(anonymous, Err(CliError::SignInRequired { .. })));

        run(
            CartCommand::Show,
            &mut store,
            &catalog(None),
            &customer(),
            NPR,
            &mut out,
        )
        .await?;

        assert!(String::from_utf8(out)?.contains("Your cart is empty."));

        Ok(())
    }

    #[tokio::test]
    async fn update_to_zero_removes_the_line() -> TestResult {
        let mut store = CartStore::open(MemoryStorage::new());
        let lookup = saffron::menu::CategoryLookup::default();
        let mut out = Vec::new();

        store.add_item(NewLineItem::from_menu_item(&momo(None), &lookup), 3);

        run(
            CartCommand::Update {
                item_id: "101".to_string(),
                quantity: 0,
            },
            &mut store,
            &catalog(None),
            &AuthSession::default(),
            NPR,
            &mut out,
        )
        .await?;

        assert!(store.cart().is_empty());
        assert!(String::from_utf8(out)?.contains("Cart: 0 item(s)"));

        Ok(())
    }

    #[test]
    fn order_type_switch_is_reported() -> TestResult {
        let mut store = CartStore::open(MemoryStorage::new());
        let mut out = Vec::new();

        set_order_type(&mut store, OrderType::Delivery, &mut out)?;

        assert_eq!(store.cart().order_type(), OrderType::Delivery);
        assert_eq!(String::from_utf8(out)?, "Order type: delivery\n");

        Ok(())
    }
}
