//! Client Config

use std::time::Duration;

/// Backend base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Configuration for connecting to the ordering backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, e.g. `"http://localhost:8000/api"`.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slashes() {
        let config = ClientConfig {
            base_url: "http://example.com/api/".to_string(),
            ..ClientConfig::default()
        };

        assert_eq!(config.url("/menu-items"), "http://example.com/api/menu-items");
        assert_eq!(config.url("orders/7"), "http://example.com/api/orders/7");
    }
}
