//! Saffron ordering client CLI

use std::{io, process};

use tracing::warn;

use crate::{config::Cli, context::Context, errors::CliError};

mod commands;
mod config;
mod context;
mod errors;
mod logging;
mod output;

/// Saffron CLI entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let cli = Cli::load().unwrap_or_else(|e| e.exit());

    if let Err(error) = logging::init_logging(&cli.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("Logging error: {error}");
        }

        process::exit(1);
    }

    if let Err(error) = run(cli).await {
        report(&error);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::new(&cli)?;
    let mut out = io::stdout().lock();

    let result = commands::run(cli.command, &ctx, &mut out).await;

    if result.as_ref().is_err_and(CliError::session_expired) {
        warn!("stored session rejected by the backend, signing out");

        ctx.auth_store().sign_out();
    }

    result
}

#[expect(clippy::print_stderr, reason = "user-facing error report")]
fn report(error: &CliError) {
    eprintln!("error: {error}");

    if let Some(fields) = error.field_errors() {
        for (field, field_error) in fields.iter() {
            eprintln!("  {field}: {field_error}");
        }
    }
}
