//! Bill

use std::io;

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, LineItem},
    checkout::CheckoutSummary,
    money::format_amount,
    order::{Order, OrderLine},
};

/// Errors that can occur when writing a bill.
#[derive(Debug, Error)]
pub enum BillError {
    /// Output could not be written.
    #[error("failed to write bill")]
    Io(#[from] io::Error),
}

struct BillRow<'a> {
    name: &'a str,
    quantity: u32,
    price: Decimal,
    total: Decimal,
}

impl<'a> From<&'a LineItem> for BillRow<'a> {
    fn from(line: &'a LineItem) -> Self {
        Self {
            name: line.name(),
            quantity: line.quantity(),
            price: line.price(),
            total: line.line_total(),
        }
    }
}

impl<'a> From<&'a OrderLine> for BillRow<'a> {
    fn from(line: &'a OrderLine) -> Self {
        Self {
            name: &line.name,
            quantity: line.quantity,
            price: line.price,
            total: line.line_total(),
        }
    }
}

/// Write the cart as an itemised bill followed by its checkout summary.
///
/// # Errors
///
/// Returns [`BillError::Io`] when `out` cannot be written.
pub fn write_bill(
    out: impl io::Write,
    cart: &Cart,
    summary: &CheckoutSummary,
    currency: &'static Currency,
) -> Result<(), BillError> {
    write_rows(
        out,
        cart.items().iter().map(BillRow::from),
        summary,
        currency,
    )
}

/// Write a placed order as an itemised bill, using the amounts the backend recorded.
///
/// # Errors
///
/// Returns [`BillError::Io`] when `out` cannot be written.
pub fn write_order_bill(
    mut out: impl io::Write,
    order: &Order,
    currency: &'static Currency,
) -> Result<(), BillError> {
    writeln!(
        out,
        "Order #{}  {}  {}",
        order.id,
        order.order_type,
        order.created_at.strftime("%Y-%m-%d %H:%M")
    )?;
    writeln!(
        out,
        "Status: {}  Payment: {}",
        order.status, order.payment_status
    )?;

    let summary = CheckoutSummary {
        subtotal: order.subtotal,
        tax: order.tax,
        total: order.total,
    };

    write_rows(out, order.items.iter().map(BillRow::from), &summary, currency)
}

fn write_rows<'a>(
    mut out: impl io::Write,
    rows: impl Iterator<Item = BillRow<'a>>,
    summary: &CheckoutSummary,
    currency: &'static Currency,
) -> Result<(), BillError> {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Price", "Total"]);

    for row in rows {
        builder.push_record([
            row.name.to_string(),
            row.quantity.to_string(),
            format_amount(row.price, currency),
            format_amount(row.total, currency),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..4), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "\n{table}")?;

    let lines = [
        ("Subtotal:", format_amount(summary.subtotal, currency)),
        ("Tax (10%):", format_amount(summary.tax, currency)),
        ("Total:", format_amount(summary.total, currency)),
    ];

    let label_width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = lines
        .iter()
        .map(|(_, value)| value.chars().count())
        .max()
        .unwrap_or(0);

    for (label, value) in lines {
        writeln!(out, " {label:>label_width$}  {value:>value_width$}")?;
    }

    writeln!(out)?;

    Ok(())
}
