//! Order history

use std::io;

use clap::Subcommand;
use rusty_money::iso::Currency;
use saffron::{
    auth::AuthSession,
    bill::write_order_bill,
    money::format_amount,
    order::{Order, OrderId, StepState},
    routes::Route,
};
use saffron_client::OrdersApi;

use crate::{commands::require, errors::CliError, output::write_table};

/// Order subcommands.
#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// List your orders
    List,

    /// Show an order's bill and progress
    Show {
        /// Order id
        id: String,
    },

    /// Start a new payment attempt for an unpaid order
    Repay {
        /// Order id
        id: String,
    },
}

pub(crate) async fn run<A: OrdersApi>(
    command: OrdersCommand,
    api: &A,
    session: &AuthSession,
    currency: &'static Currency,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    match command {
        OrdersCommand::List => {
            require(Route::MyOrders, session)?;

            let orders = api.my_orders().await?;

            if orders.is_empty() {
                writeln!(out, "You have not placed any orders yet.")?;

                return Ok(());
            }

            write_orders(out, &orders, currency)?;
        }
        OrdersCommand::Show { id } => {
            require(Route::OrderBill, session)?;

            let order = api.order(&OrderId::new(id)).await?;

            write_order_bill(&mut *out, &order, currency)?;
            write_timeline(out, &order)?;
        }
        OrdersCommand::Repay { id } => {
            require(Route::MyOrders, session)?;

            let id = OrderId::new(id);
            let order = api.order(&id).await?;

            if !order.can_repay() {
                return Err(CliError::NotRepayable(id.into_string()));
            }

            let payment = api.repay_order(&id).await?;

            match payment.payment_url {
                Some(url) => writeln!(out, "Complete payment at {url}")?,
                None => writeln!(out, "Payment restarted for order #{id}")?,
            }
        }
    }

    Ok(())
}

/// One row per order, newest first as the backend sends them.
pub(crate) fn write_orders(
    out: impl io::Write,
    orders: &[Order],
    currency: &'static Currency,
) -> io::Result<()> {
    write_table(
        out,
        &["Order", "Placed", "Type", "Items", "Status", "Payment", "Total"],
        orders.iter().map(|order| {
            vec![
                format!("#{}", order.id),
                order.created_at.strftime("%Y-%m-%d %H:%M").to_string(),
                order.order_type.to_string(),
                order.item_count().to_string(),
                order.status.to_string(),
                order.payment_status.to_string(),
                format_amount(order.total, currency),
            ]
        }),
    )
}

fn write_timeline(mut out: impl io::Write, order: &Order) -> io::Result<()> {
    for step in order.timeline() {
        let marker = match step.state {
            StepState::Done => "[x]",
            StepState::Current => "[>]",
            StepState::Upcoming => "[ ]",
        };

        writeln!(out, "{marker} {}", step.status)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use rusty_money::iso::NPR;
    use saffron::{
        auth::{Role, User, UserId},
        cart::OrderType,
        menu::{LocationId, MenuItemId},
        order::{OrderLine, OrderStatus, PaymentStatus},
    };
    use saffron_client::{MockOrdersApi, PaymentSession};
    use testresult::TestResult;

    use super::*;

    fn customer() -> AuthSession {
        AuthSession::new(
            User {
                id: UserId::new("u1"),
                name: "Asha".to_string(),
                role: Role::Customer,
                email: None,
                phone: None,
            },
            "token",
        )
    }

    fn order(status: OrderStatus, payment_status: PaymentStatus) -> TestResult<Order> {
        Ok(Order {
            id: OrderId::new("42"),
            items: vec![OrderLine {
                menu_item_id: MenuItemId::new("101"),
                name: "Veg Momo".to_string(),
                price: Decimal::from(200),
                quantity: 3,
            }],
            order_type: OrderType::Pickup,
            location_id: Some(LocationId::new("1")),
            status,
            payment_status,
            subtotal: Decimal::from(600),
            tax: Decimal::from(60),
            total: Decimal::from(660),
            created_at: "2026-03-01T12:30:00Z".parse::<Timestamp>()?,
        })
    }

    #[tokio::test]
    async fn show_prints_bill_and_timeline() -> TestResult {
        let placed = order(OrderStatus::Preparing, PaymentStatus::Paid)?;
        let mut api = MockOrdersApi::new();
        let mut out = Vec::new();

        api.expect_order()
            .withf(|id| id.as_str() == "42")
            .returning(move |_| Ok(placed.clone()));

        run(
            OrdersCommand::Show {
                id: "42".to_string(),
            },
            &api,
            &customer(),
            NPR,
            &mut out,
        )
        .await?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Order #42"));
        assert!(text.contains("[x] Confirmed"));
        assert!(text.contains("[>] Preparing"));
        assert!(text.contains("[ ] Ready"));

        Ok(())
    }

    #[tokio::test]
    async fn list_renders_one_row_per_order() -> TestResult {
        let placed = order(OrderStatus::Completed, PaymentStatus::Paid)?;
        let mut api = MockOrdersApi::new();
        let mut out = Vec::new();

        api.expect_my_orders()
            .returning(move || Ok(vec![placed.clone()]));

        run(OrdersCommand::List, &api, &customer(), NPR, &mut out).await?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("#42"));
        assert!(text.contains("2026-03-01 12:30"));

        Ok(())
    }

    #[tokio::test]
    async fn paid_orders_cannot_be_repaid() -> TestResult {
        let placed = order(OrderStatus::Pending, PaymentStatus::Paid)?;
        let mut api = MockOrdersApi::new();
        let mut out = Vec::new();

        api.expect_order().returning(move |_| Ok(placed.clone()));
        api.expect_repay_order().never();

        let result = run(
            OrdersCommand::Repay {
                id: "42".to_string(),
            },
            &api,
            &customer(),
            NPR,
            &mut out,
        )
        .await;

        assert!(matches!(result, Err(CliError::NotRepayable(id)) if id == "42"));

        Ok(())
    }

    #[tokio::test]
    async fn failed_payment_can_be_retried() -> TestResult {
        let placed = order(OrderStatus::Pending, PaymentStatus::Failed)?;
        let mut api = MockOrdersApi::new();
        let mut out = Vec::new();

        api.expect_order().returning(move |_| Ok(placed.clone()));
        api.expect_repay_order().times(1).returning(|id| {
            Ok(PaymentSession {
                order_id: id.clone(),
                payment_url: Some("https://pay.example.com/42".to_string()),
            })
        });

        run(
            OrdersCommand::Repay {
                id: "42".to_string(),
            },
            &api,
            &customer(),
            NPR,
            &mut out,
        )
        .await?;

        assert!(String::from_utf8(out)?.contains("https://pay.example.com/42"));

        Ok(())
    }
}
