//! Saffron prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    auth::{
        AUTH_STORAGE_KEY, AuthSession, AuthState, AuthStore, Role, User, UserId,
        validation::{FieldError, FieldErrors},
    },
    bill::{BillError, write_bill, write_order_bill},
    cart::{CART_STORAGE_KEY, Cart, CartStore, LineItem, NewLineItem, OrderType},
    checkout::{
        CheckoutDetails, CheckoutError, CheckoutSummary, OrderRequest, OrderRequestLine,
        PaymentMethod, prepare_order,
    },
    ids::TypedId,
    menu::{
        CategorySelection, DietaryFilter, DietaryFilters, MenuFilter, category_labels,
        filter_menu, group_by_category,
        models::{
            Category, CategoryId, CategoryLookup, DeliveryService, DeliveryServiceId, Location,
            LocationId, MenuItem, MenuItemId,
        },
    },
    money::{CurrencyError, find_currency, format_amount},
    order::{Order, OrderId, OrderLine, OrderStatus, PaymentStatus, StepState, TimelineStep},
    routes::{Access, GuardDecision, Route, guard, sign_in_route_for},
    storage::{FileStorage, MemoryStorage, StateStorage, StorageError},
};
