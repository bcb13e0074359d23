//! Checkout

use std::io;

use clap::{Args, ValueEnum};
use rusty_money::iso::Currency;
use saffron::{
    auth::AuthSession,
    bill::{write_bill, write_order_bill},
    cart::CartStore,
    checkout::{CheckoutDetails, CheckoutSummary, PaymentMethod, prepare_order},
    menu::DeliveryServiceId,
    routes::Route,
    storage::StateStorage,
};
use saffron_client::{OrdersApi, submit_order};
use tracing::{info, warn};

use crate::{commands::require, errors::CliError};

/// Payment method flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PaymentArg {
    /// Pay on pickup or delivery
    #[default]
    Cash,

    /// Pay through the online gateway
    Online,
}

impl From<PaymentArg> for PaymentMethod {
    fn from(value: PaymentArg) -> Self {
        match value {
            PaymentArg::Cash => Self::Cash,
            PaymentArg::Online => Self::Online,
        }
    }
}

/// Checkout form.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Name for the order; defaults to the signed-in user's name
    #[arg(long)]
    pub name: Option<String>,

    /// Contact phone; defaults to the signed-in user's phone
    #[arg(long)]
    pub phone: Option<String>,

    /// Delivery address
    #[arg(long)]
    pub address: Option<String>,

    /// Delivery service id
    #[arg(long)]
    pub delivery_service: Option<String>,

    /// Notes for the kitchen
    #[arg(long)]
    pub notes: Option<String>,

    /// How you will pay
    #[arg(long, value_enum, default_value_t)]
    pub payment: PaymentArg,

    /// Validate and print the bill without placing the order
    #[arg(long)]
    pub dry_run: bool,
}

impl CheckoutArgs {
    /// Form input, filling name and phone from the session when not given.
    pub(crate) fn details(&self, session: &AuthSession) -> CheckoutDetails {
        let user = session.user();

        CheckoutDetails {
            customer_name: self
                .name
                .clone()
                .or_else(|| user.map(|user| user.name.clone()))
                .unwrap_or_default(),
            phone: self
                .phone
                .clone()
                .or_else(|| user.and_then(|user| user.phone.clone()))
                .unwrap_or_default(),
            delivery_address: self.address.clone(),
            delivery_service_id: self.delivery_service.clone().map(DeliveryServiceId::new),
            notes: self.notes.clone(),
            payment_method: self.payment.into(),
        }
    }
}

pub(crate) async fn run<S: StateStorage, A: OrdersApi>(
    args: &CheckoutArgs,
    store: &mut CartStore<S>,
    api: &A,
    session: &AuthSession,
    currency: &'static Currency,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    require(Route::Checkout, session)?;

    let details = args.details(session);

    if args.dry_run {
        prepare_order(store.cart(), &details)?;

        let summary = CheckoutSummary::for_cart(store.cart());

        write_bill(&mut *out, store.cart(), &summary, currency)?;
        writeln!(out, "Dry run: order not placed.")?;

        return Ok(());
    }

    let order = submit_order(store, &details, api).await?;

    info!(order = %order.id, total = %order.total, "order placed");

    write_order_bill(&mut *out, &order, currency)?;
    writeln!(out, "Order #{} placed.", order.id)?;

    if details.payment_method == PaymentMethod::Online && order.can_repay() {
        match api.repay_order(&order.id).await {
            Ok(payment) => match payment.payment_url {
                Some(url) => writeln!(out, "Complete payment at {url}")?,
                None => writeln!(out, "Payment will be collected on handover.")?,
            },
            Err(error) => {
                warn!(order = %order.id, "could not start payment: {error}");

                writeln!(
                    out,
                    "Payment could not be started ({error}). Retry with `saffron orders repay {}`",
                    order.id
                )?;
            }
        }
    }

    Ok(())
}
