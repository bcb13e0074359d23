//! Money

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso};
use thiserror::Error;

/// Currency used when none is configured.
pub const DEFAULT_CURRENCY: &str = "NPR";

/// Errors related to currency configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    /// The configured ISO code is not a known currency.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Look up an ISO 4217 currency by its alpha code.
///
/// # Errors
///
/// Returns [`CurrencyError::UnknownCurrency`] when the code is not recognised.
pub fn find_currency(code: &str) -> Result<&'static iso::Currency, CurrencyError> {
    iso::find(&code.to_ascii_uppercase())
        .ok_or_else(|| CurrencyError::UnknownCurrency(code.to_string()))
}

/// Display tax rate applied at checkout.
#[must_use]
pub fn tax_rate() -> Percentage {
    Percentage::from(Decimal::new(10, 2))
}

/// Apply a percentage to an amount, rounded half away from zero to two decimal places.
#[must_use]
pub fn percent_of(amount: Decimal, percent: Percentage) -> Decimal {
    round_to_cents(percent * amount)
}

/// Round an amount half away from zero to two decimal places.
#[must_use]
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount in the given currency, e.g. `रू1,250.00`.
#[must_use]
pub fn format_amount(amount: Decimal, currency: &'static iso::Currency) -> String {
    Money::from_decimal(amount, currency).to_string()
}
