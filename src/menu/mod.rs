//! Menu

pub mod filter;
pub mod models;

pub use filter::*;
pub use models::*;
