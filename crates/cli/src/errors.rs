//! CLI errors.

use std::io;

use saffron::{
    auth::validation::FieldErrors,
    bill::BillError,
    checkout::CheckoutError,
    money::CurrencyError,
    routes::{Route, UnknownRoute},
    storage::StorageError,
};
use saffron_client::{ApiError, LoginError, SubmitError};
use thiserror::Error;

/// Errors surfaced to the user by a command.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// Backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Order submission failed.
    #[error(transparent)]
    Submit(#[from] SubmitError),

    /// Login failed.
    #[error(transparent)]
    Login(#[from] LoginError),

    /// Cart or checkout form not ready.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Local state directory unusable.
    #[error("could not open local state: {0}")]
    Storage(#[from] StorageError),

    /// Configured currency unknown.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// Bill rendering failed.
    #[error(transparent)]
    Bill(#[from] BillError),

    /// Output could not be written.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),

    /// `access` was given a path that is not a page.
    #[error(transparent)]
    Route(#[from] UnknownRoute),

    /// The page needs a signed-in session.
    #[error("sign in first at {login} (then return to {return_to})")]
    SignInRequired {
        /// Login page for the page's audience
        login: Route,

        /// Page that was requested
        return_to: Route,
    },

    /// The signed-in role may not open the page.
    #[error("your account cannot open {0}")]
    Forbidden(Route),

    /// No menu item with that id.
    #[error("no menu item with id {0}")]
    UnknownMenuItem(String),

    /// The menu item is sold out.
    #[error("{0} is currently unavailable")]
    Unavailable(String),

    /// No active pickup location with that id.
    #[error("no active location with id {0}")]
    UnknownLocation(String),

    /// The order is paid or cancelled.
    #[error("order #{0} has nothing left to pay")]
    NotRepayable(String),
}

impl CliError {
    /// Per-field validation failures, when that is what went wrong.
    pub(crate) fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Checkout(CheckoutError::Validation(errors))
            | Self::Submit(SubmitError::Checkout(CheckoutError::Validation(errors)))
            | Self::Login(LoginError::Validation(errors)) => Some(errors),
            _ => None,
        }
    }

    /// Whether the backend rejected the stored token. A refused login is not an expired session.
    pub(crate) fn session_expired(&self) -> bool {
        matches!(
            self,
            Self::Api(ApiError::Unauthorized { .. })
                | Self::Submit(SubmitError::Api(ApiError::Unauthorized { .. }))
        )
    }
}
