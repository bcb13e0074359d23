//! Saffron
//!
//! Client-side ordering core for a restaurant storefront and its staff back office: the cart and
//! order context, menu filtering, checkout pricing, the authenticated session, route guards and the
//! persisted client state they share.

pub mod auth;
pub mod bill;
pub mod cart;
pub mod checkout;
pub mod ids;
pub mod menu;
pub mod money;
pub mod order;
pub mod prelude;
pub mod routes;
pub mod storage;
