//! Order endpoints and submission.

use async_trait::async_trait;
use mockall::automock;
use saffron::{
    cart::CartStore,
    checkout::{CheckoutDetails, CheckoutError, OrderRequest, prepare_order},
    order::{Order, OrderId},
    storage::StateStorage,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{errors::ApiError, http::ApiClient};

/// Payment hand-off returned when (re)starting an online payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSession {
    /// Order being paid for
    pub order_id: OrderId,

    /// Gateway page to send the customer to; absent for cash orders
    #[serde(default)]
    pub payment_url: Option<String>,
}

/// Customer order endpoints.
#[automock]
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// Place an order.
    async fn create_order(&self, request: &OrderRequest) -> Result<Order, ApiError>;

    /// The signed-in customer's orders, newest first.
    async fn my_orders(&self) -> Result<Vec<Order>, ApiError>;

    /// A single order.
    async fn order(&self, id: &OrderId) -> Result<Order, ApiError>;

    /// Start a new payment attempt for an unpaid order.
    async fn repay_order(&self, id: &OrderId) -> Result<PaymentSession, ApiError>;
}

#[async_trait]
impl OrdersApi for ApiClient {
    async fn create_order(&self, request: &OrderRequest) -> Result<Order, ApiError> {
        self.post("/orders", request).await
    }

    async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("/orders/my-orders").await
    }

    async fn order(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.get(&format!("/orders/{id}")).await
    }

    async fn repay_order(&self, id: &OrderId) -> Result<PaymentSession, ApiError> {
        self.post(&format!("/orders/{id}/repay"), &serde_json::json!({}))
            .await
    }
}

/// Errors that can occur when submitting the cart as an order.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The cart or form is not ready.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The backend rejected the order or could not be reached.
    #[error("order could not be placed: {0}")]
    Api(#[from] ApiError),
}

/// Validate the cart, place the order and clear the cart once the backend has accepted it.
///
/// The cart is left untouched on any failure so the customer can retry.
///
/// # Errors
///
/// Returns [`SubmitError::Checkout`] before any request is made when the cart or form is invalid,
/// and [`SubmitError::Api`] when the request fails.
pub async fn submit_order<S, A>(
    store: &mut CartStore<S>,
    details: &CheckoutDetails,
    api: &A,
) -> Result<Order, SubmitError>
where
    S: StateStorage,
    A: OrdersApi + ?Sized,
{
    let request = prepare_order(store.cart(), details)?;

    let order = api.create_order(&request).await.inspect_err(|err| {
        warn!("order submission failed: {err}");
    })?;

    info!(order = %order.id, total = %order.total, "order placed");

    store.clear_cart();

    Ok(order)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use saffron::{
        cart::{NewLineItem, OrderType},
        menu::models::{LocationId, MenuItemId},
        order::{OrderLine, OrderStatus, PaymentStatus},
        storage::MemoryStorage,
    };
    use testresult::TestResult;

    use super::*;

    fn store_with_momo() -> CartStore<MemoryStorage> {
        let mut store = CartStore::open(MemoryStorage::new());

        store.add_item(
            NewLineItem {
                id: MenuItemId::new("101"),
                name: "Veg Momo".to_string(),
                description: String::new(),
                price: Decimal::from(180),
                category: "Momo".to_string(),
                image: None,
                vegetarian: Some(true),
            },
            2,
        );
        store.set_selected_location_id(Some(LocationId::new("1")));

        store
    }

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            customer_name: "Asha".to_string(),
            phone: "9841234567".to_string(),
            ..CheckoutDetails::default()
        }
    }

    fn placed(request: &OrderRequest) -> TestResult<Order> {
        Ok(Order {
            id: OrderId::new("500"),
            items: request
                .items
                .iter()
                .map(|line| OrderLine {
                    menu_item_id: line.menu_item_id.clone(),
                    name: "Veg Momo".to_string(),
                    price: Decimal::from(180),
                    quantity: line.quantity,
                })
                .collect(),
            order_type: request.order_type,
            location_id: request.location_id.clone(),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            subtotal: Decimal::from(360),
            tax: Decimal::from(36),
            total: Decimal::from(396),
            created_at: "2024-05-01T12:00:00Z".parse()?,
        })
    }

    #[tokio::test]
    async fn success_clears_cart() -> TestResult {
        let mut store = store_with_momo();
        let mut api = MockOrdersApi::new();

        api.expect_create_order()
            .once()
            .withf(|request| {
                request.order_type == OrderType::Pickup
                    && request.location_id == Some(LocationId::new("1"))
                    && request.items.len() == 1
            })
            .returning(|request| placed(request).map_err(|_err| ApiError::NotFound));

        let order = submit_order(&mut store, &details(), &api).await?;

        assert_eq!(order.id, OrderId::new("500"));
        assert!(store.cart().is_empty());
        assert_eq!(
            store.cart().selected_location_id(),
            Some(&LocationId::new("1"))
        );

        Ok(())
    }

    #[tokio::test]
    async fn failure_keeps_cart() {
        let mut store = store_with_momo();
        let mut api = MockOrdersApi::new();

        api.expect_create_order().once().returning(|_| {
            Err(ApiError::UnexpectedResponse {
                status: 422,
                message: "Location closed".to_string(),
            })
        });

        let result = submit_order(&mut store, &details(), &api).await;

        assert!(
            matches!(result, Err(SubmitError::Api(_))),
            "expected Api error, got {result:?}"
        );
        assert_eq!(store.cart().item_count(), 2);
    }

    #[tokio::test]
    async fn invalid_checkout_makes_no_request() {
        let mut store = store_with_momo();
        store.set_selected_location_id(None);

        let mut api = MockOrdersApi::new();
        api.expect_create_order().never();

        let result = submit_order(&mut store, &details(), &api).await;

        assert!(
            matches!(
                result,
                Err(SubmitError::Checkout(CheckoutError::MissingPickupLocation))
            ),
            "expected MissingPickupLocation, got {result:?}"
        );
        assert!(!store.cart().is_empty());
    }
}
