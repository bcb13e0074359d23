//! Subcommands

use std::io;

use clap::Subcommand;
use saffron::{
    auth::AuthSession,
    cart::OrderType,
    routes::{GuardDecision, Route, guard},
};
use saffron_client::LoginFlow;

use crate::{context::Context, errors::CliError};

pub(crate) mod access;
pub(crate) mod admin;
pub(crate) mod auth;
pub(crate) mod cart;
pub(crate) mod checkout;
pub(crate) mod location;
pub(crate) mod menu;
pub(crate) mod orders;

pub(crate) use admin::AdminCommand;
pub(crate) use auth::{LoginCommand, SignupArgs};
pub(crate) use cart::CartCommand;
pub(crate) use checkout::CheckoutArgs;
pub(crate) use location::LocationCommand;
pub(crate) use menu::MenuArgs;
pub(crate) use orders::OrdersCommand;

/// Everything the client can do.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the menu
    Menu(MenuArgs),

    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        command: CartCommand,
    },

    /// Choose pickup or delivery
    OrderType {
        /// `pickup` or `delivery`
        order_type: OrderType,
    },

    /// List or choose a pickup location
    Location {
        #[command(subcommand)]
        command: LocationCommand,
    },

    /// Review the bill and place the order
    Checkout(CheckoutArgs),

    /// Your orders
    Orders {
        #[command(subcommand)]
        command: OrdersCommand,
    },

    /// Sign in
    Login {
        #[command(subcommand)]
        command: LoginCommand,
    },

    /// Create a customer account
    Signup(SignupArgs),

    /// Sign out
    Logout,

    /// Show whether the current session may open a page
    Access {
        /// Page path, e.g. `/checkout`
        path: String,
    },

    /// Back-office views for staff and admins
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

/// Run a parsed command against the live backend and local state.
pub(crate) async fn run(
    command: Command,
    ctx: &Context,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    let mut auth_store = ctx.auth_store();
    let session = auth_store.session().clone();

    match command {
        Command::Menu(args) => menu::run(&args, &ctx.catalog(), ctx.currency, out).await,
        Command::Cart { command } => {
            cart::run(
                command,
                &mut ctx.cart_store(),
                &ctx.catalog(),
                &session,
                ctx.currency,
                out,
            )
            .await
        }
        Command::OrderType { order_type } => {
            cart::set_order_type(&mut ctx.cart_store(), order_type, out)
        }
        Command::Location { command } => {
            location::run(command, &mut ctx.cart_store(), &ctx.catalog(), out).await
        }
        Command::Checkout(args) => {
            checkout::run(
                &args,
                &mut ctx.cart_store(),
                &ctx.client,
                &session,
                ctx.currency,
                out,
            )
            .await
        }
        Command::Orders { command } => {
            orders::run(command, &ctx.client, &session, ctx.currency, out).await
        }
        Command::Login { command } => {
            auth::login(command, &LoginFlow::new(ctx.client.clone()), &mut auth_store, out).await
        }
        Command::Signup(args) => {
            auth::signup(&args, &LoginFlow::new(ctx.client.clone()), out).await
        }
        Command::Logout => auth::logout(&LoginFlow::new(ctx.client.clone()), &mut auth_store, out),
        Command::Access { path } => access::run(&path, &session, out),
        Command::Admin { command } => {
            admin::run(command, &ctx.client, &session, ctx.currency, out).await
        }
    }
}

/// Fail unless `session` may open `route`.
pub(crate) fn require(route: Route, session: &AuthSession) -> Result<(), CliError> {
    match guard(&route, session) {
        GuardDecision::Allow => Ok(()),
        GuardDecision::SignIn { login, return_to } => {
            Err(CliError::SignInRequired { login, return_to })
        }
        GuardDecision::Unauthorized => Err(CliError::Forbidden(route)),
    }
}
