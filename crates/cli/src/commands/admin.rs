//! Back-office commands

use std::io;

use clap::{Subcommand, ValueEnum};
use jiff::civil::Date;
use rusty_money::iso::Currency;
use saffron::{
    auth::AuthSession,
    menu::CategoryId,
    money::format_amount,
    order::{OrderId, OrderStatus},
    routes::Route,
};
use saffron_client::{AdminApi, admin::CategoryInput};
use tracing::info;

use crate::{
    commands::{orders::write_orders, require},
    errors::CliError,
    output::write_table,
};

/// Status flag for the order board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Awaiting confirmation
    Pending,
    /// Accepted by the kitchen
    Confirmed,
    /// Being cooked
    Preparing,
    /// Ready for pickup or dispatch
    Ready,
    /// With the rider
    OutForDelivery,
    /// Handed over
    Completed,
    /// Cancelled
    Cancelled,
}

impl From<StatusArg> for OrderStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Pending => Self::Pending,
            StatusArg::Confirmed => Self::Confirmed,
            StatusArg::Preparing => Self::Preparing,
            StatusArg::Ready => Self::Ready,
            StatusArg::OutForDelivery => Self::OutForDelivery,
            StatusArg::Completed => Self::Completed,
            StatusArg::Cancelled => Self::Cancelled,
        }
    }
}

/// Back-office subcommands.
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Today's headline numbers
    Dashboard,

    /// Every order on the board
    Orders,

    /// Move an order to a new status
    Status {
        /// Order id
        id: String,

        /// New status
        #[arg(value_enum)]
        status: StatusArg,
    },

    /// Add a menu category
    AddCategory {
        /// Category name
        name: String,

        /// Category description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a menu category
    DeleteCategory {
        /// Category id
        id: String,
    },

    /// Sales between two days, inclusive
    Sales {
        /// First day, `YYYY-MM-DD`
        #[arg(long)]
        from: Date,

        /// Last day, `YYYY-MM-DD`
        #[arg(long)]
        to: Date,
    },

    /// Payment attempts
    Payments,

    /// Back-office accounts
    Staff,
}

impl AdminCommand {
    /// Page whose audience may run this command.
    fn route(&self) -> Route {
        match self {
            Self::Dashboard => Route::Dashboard,
            Self::Orders | Self::Status { .. } => Route::OrderManagement,
            Self::AddCategory { .. } | Self::DeleteCategory { .. } => Route::CategoryManagement,
            Self::Sales { .. } => Route::Admin("sales".to_string()),
            Self::Payments => Route::Admin("payments".to_string()),
            Self::Staff => Route::Admin("staff".to_string()),
        }
    }
}

pub(crate) async fn run<A: AdminApi>(
    command: AdminCommand,
    api: &A,
    session: &AuthSession,
    currency: &'static Currency,
    out: &mut impl io::Write,
) -> Result<(), CliError> {
    require(command.route(), session)?;

    match command {
        AdminCommand::Dashboard => {
            let metrics = api.dashboard_metrics().await?;

            writeln!(out, "Orders today:    {}", metrics.orders_today)?;
            writeln!(
                out,
                "Revenue today:   {}",
                format_amount(metrics.revenue_today, currency)
            )?;
            writeln!(out, "Open orders:     {}", metrics.open_orders)?;
            writeln!(out, "Available items: {}", metrics.available_items)?;
        }
        AdminCommand::Orders => {
            let orders = api.all_orders().await?;

            write_orders(out, &orders, currency)?;
        }
        AdminCommand::Status { id, status } => {
            let order = api
                .update_order_status(&OrderId::new(id), status.into())
                .await?;

            info!(order = %order.id, status = %order.status, "order status changed");

            writeln!(out, "Order #{} is now {}", order.id, order.status)?;
        }
        AdminCommand::AddCategory { name, description } => {
            let category = api
                .create_category(&CategoryInput { name, description })
                .await?;

            writeln!(out, "Added category {} ({})", category.name, category.id)?;
        }
        AdminCommand::DeleteCategory { id } => {
            api.delete_category(&CategoryId::new(id.as_str())).await?;

            writeln!(out, "Deleted category {id}")?;
        }
        AdminCommand::Sales { from, to } => {
            let report = api.sales_report(from, to).await?;

            write_table(
                &mut *out,
                &["Day", "Orders", "Revenue"],
                report.daily.iter().map(|day| {
                    vec![
                        day.date.to_string(),
                        day.orders.to_string(),
                        format_amount(day.revenue, currency),
                    ]
                }),
            )?;
            writeln!(
                out,
                "{} to {}: {} orders, {}",
                report.from,
                report.to,
                report.total_orders,
                format_amount(report.total_revenue, currency)
            )?;
        }
        AdminCommand::Payments => {
            let payments = api.payments().await?;

            write_table(
                out,
                &["Order", "Amount", "Method", "Status", "At"],
                payments.iter().map(|payment| {
                    vec![
                        format!("#{}", payment.order_id),
                        format_amount(payment.amount, currency),
                        payment.method.to_string(),
                        payment.status.to_string(),
                        payment.created_at.strftime("%Y-%m-%d %H:%M").to_string(),
                    ]
                }),
            )?;
        }
        AdminCommand::Staff => {
            let staff = api.staff().await?;

            write_table(
                out,
                &["ID", "Name", "Email", "Role"],
                staff.iter().map(|member| {
                    vec![
                        member.id.to_string(),
                        member.name.clone(),
                        member.email.clone(),
                        member.role.to_string(),
                    ]
                }),
            )?;
        }
    }

    Ok(())
}
