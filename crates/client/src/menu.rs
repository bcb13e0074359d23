//! Catalog endpoints.

use async_trait::async_trait;
use mockall::automock;
use saffron::menu::models::{Category, DeliveryService, Location, MenuItem};

use crate::{errors::ApiError, http::ApiClient};

/// Read-only catalog endpoints used by the storefront.
#[automock]
#[async_trait]
pub trait MenuApi: Send + Sync {
    /// Every menu item.
    async fn menu_items(&self) -> Result<Vec<MenuItem>, ApiError>;

    /// Every category.
    async fn categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Pickup locations.
    async fn locations(&self) -> Result<Vec<Location>, ApiError>;

    /// Delivery partners.
    async fn delivery_services(&self) -> Result<Vec<DeliveryService>, ApiError>;
}

#[async_trait]
impl MenuApi for ApiClient {
    async fn menu_items(&self) -> Result<Vec<MenuItem>, ApiError> {
        self.get("/menu-items").await
    }

    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get("/categories").await
    }

    async fn locations(&self) -> Result<Vec<Location>, ApiError> {
        self.get("/locations").await
    }

    async fn delivery_services(&self) -> Result<Vec<DeliveryService>, ApiError> {
        self.get("/delivery-services").await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use crate::{config::ClientConfig, http::test_server::respond_once};

    use super::*;

    #[tokio::test]
    async fn menu_items_decode_backend_shape() -> TestResult {
        let (addr, request) = respond_once(
            "200 OK",
            r#"[{"id": 1, "name": "Veg Momo", "price": 180, "category": "2", "isVegetarian": true}]"#,
        )
        .await?;

        let client = ApiClient::new(ClientConfig {
            base_url: format!("http://{addr}"),
            timeout: Duration::from_secs(5),
        })?;

        let items = client.menu_items().await?;

        assert_eq!(items.len(), 1);
        assert_eq!(items.first().map(|item| item.is_vegetarian), Some(true));
        assert!(request.await?.starts_with("GET /menu-items "));

        Ok(())
    }
}
