//! API Config

use std::time::Duration;

use clap::Args;
use saffron_client::{ClientConfig, config::DEFAULT_BASE_URL};

/// Backend connection settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Backend API root
    #[arg(long, env = "SAFFRON_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "SAFFRON_API_TIMEOUT_SECONDS", default_value_t = 15_u64)]
    pub api_timeout_seconds: u64,
}

impl ApiConfig {
    /// Client settings for these options.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.api_timeout_seconds),
        }
    }
}
