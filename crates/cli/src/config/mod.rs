//! CLI configuration module

use clap::Parser;

use crate::{
    commands::Command,
    config::{api::ApiConfig, observability::LoggingConfig, session::SessionConfig},
};

pub(crate) mod api;
pub(crate) mod observability;
pub(crate) mod session;

/// Saffron ordering client
#[derive(Debug, Parser)]
#[command(name = "saffron", about = "Saffron restaurant ordering client", long_about = None)]
pub struct Cli {
    /// Backend connection settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Local session settings.
    #[command(flatten)]
    pub session: SessionConfig,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}
