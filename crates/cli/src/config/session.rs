//! Session Config

use std::path::PathBuf;

use clap::Args;
use saffron::money::DEFAULT_CURRENCY;

/// Local session settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Directory holding the persisted cart and sign-in session
    #[arg(long, env = "SAFFRON_STATE_DIR", default_value = ".saffron")]
    pub state_dir: PathBuf,

    /// ISO 4217 currency used to display prices
    #[arg(long, env = "SAFFRON_CURRENCY", default_value = DEFAULT_CURRENCY)]
    pub currency: String,
}
