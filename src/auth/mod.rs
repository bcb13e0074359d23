//! Authentication

mod session;
mod store;
pub mod validation;

pub use session::*;
pub use store::*;
