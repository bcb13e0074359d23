//! Saffron API client
//!
//! Async client for the ordering backend: typed endpoint traits, the catalog cache, login flows
//! and order submission.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod http;
pub mod menu;
pub mod orders;

pub use admin::{AdminApi, MockAdminApi};
pub use auth::{AuthApi, AuthResponse, LoginError, LoginFlow, MockAuthApi, Registration};
pub use catalog::{CatalogQuery, MenuCatalog, MenuView};
pub use config::ClientConfig;
pub use errors::ApiError;
pub use http::ApiClient;
pub use menu::{MenuApi, MockMenuApi};
pub use orders::{MockOrdersApi, OrdersApi, PaymentSession, SubmitError, submit_order};
