//! Back-office endpoints.

use async_trait::async_trait;
use jiff::{Timestamp, civil::Date};
use mockall::automock;
use rust_decimal::Decimal;
use saffron::{
    auth::{Role, UserId},
    checkout::PaymentMethod,
    menu::models::{
        Category, CategoryId, DeliveryService, DeliveryServiceId, Location, LocationId, MenuItem,
        MenuItemId,
    },
    order::{Order, OrderId, OrderStatus, PaymentStatus},
};
use serde::{Deserialize, Serialize};

use crate::{errors::ApiError, http::ApiClient};

/// Create/update payload for a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemInput {
    /// Display name
    pub name: String,

    /// Display copy
    pub description: String,

    /// Unit price
    pub price: Decimal,

    /// Category id
    pub category_id: CategoryId,

    /// Image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Vegetarian flag
    pub is_vegetarian: bool,

    /// Popular flag
    pub is_popular: bool,

    /// Spicy flag
    pub is_spicy: bool,

    /// Shown to customers
    pub is_available: bool,
}

/// Create/update payload for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    /// Display name
    pub name: String,

    /// Display copy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Create/update payload for a pickup location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInput {
    /// Display name
    pub name: String,

    /// Street address
    pub address: String,

    /// Contact phone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Accepting orders
    pub is_active: bool,
}

/// Create/update payload for a delivery partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryServiceInput {
    /// Display name
    pub name: String,

    /// Flat delivery fee
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee: Option<Decimal>,

    /// Offered at checkout
    pub is_active: bool,
}

/// A back-office account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    /// User id
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Login email
    pub email: String,

    /// Staff or admin
    pub role: Role,
}

/// Payload for creating a back-office account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStaffMember {
    /// Display name
    pub name: String,

    /// Login email
    pub email: String,

    /// Initial password
    pub password: String,

    /// Staff or admin
    pub role: Role,
}

/// Revenue for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySales {
    /// Calendar day
    pub date: Date,

    /// Orders placed
    pub orders: u64,

    /// Revenue
    pub revenue: Decimal,
}

/// Sales over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    /// First day, inclusive
    pub from: Date,

    /// Last day, inclusive
    pub to: Date,

    /// Orders placed
    pub total_orders: u64,

    /// Revenue
    pub total_revenue: Decimal,

    /// Per-day breakdown
    #[serde(default)]
    pub daily: Vec<DailySales>,
}

/// A payment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    /// Order paid for
    pub order_id: OrderId,

    /// Amount
    pub amount: Decimal,

    /// Cash or online
    pub method: PaymentMethod,

    /// Outcome
    pub status: PaymentStatus,

    /// Attempt time
    pub created_at: Timestamp,
}

/// Headline numbers for the staff dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    /// Orders placed today
    pub orders_today: u64,

    /// Revenue today
    pub revenue_today: Decimal,

    /// Orders not yet completed or cancelled
    pub open_orders: u64,

    /// Menu items currently available
    pub available_items: u64,
}

/// Staff and admin endpoints.
#[automock]
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Add a menu item.
    async fn create_menu_item(&self, item: &MenuItemInput) -> Result<MenuItem, ApiError>;

    /// Edit a menu item.
    async fn update_menu_item(
        &self,
        id: &MenuItemId,
        item: &MenuItemInput,
    ) -> Result<MenuItem, ApiError>;

    /// Remove a menu item.
    async fn delete_menu_item(&self, id: &MenuItemId) -> Result<(), ApiError>;

    /// Add a category.
    async fn create_category(&self, category: &CategoryInput) -> Result<Category, ApiError>;

    /// Edit a category.
    async fn update_category(
        &self,
        id: &CategoryId,
        category: &CategoryInput,
    ) -> Result<Category, ApiError>;

    /// Remove a category.
    async fn delete_category(&self, id: &CategoryId) -> Result<(), ApiError>;

    /// Add a pickup location.
    async fn create_location(&self, location: &LocationInput) -> Result<Location, ApiError>;

    /// Edit a pickup location.
    async fn update_location(
        &self,
        id: &LocationId,
        location: &LocationInput,
    ) -> Result<Location, ApiError>;

    /// Remove a pickup location.
    async fn delete_location(&self, id: &LocationId) -> Result<(), ApiError>;

    /// Add a delivery partner.
    async fn create_delivery_service(
        &self,
        service: &DeliveryServiceInput,
    ) -> Result<DeliveryService, ApiError>;

    /// Edit a delivery partner.
    async fn update_delivery_service(
        &self,
        id: &DeliveryServiceId,
        service: &DeliveryServiceInput,
    ) -> Result<DeliveryService, ApiError>;

    /// Remove a delivery partner.
    async fn delete_delivery_service(&self, id: &DeliveryServiceId) -> Result<(), ApiError>;

    /// Back-office accounts.
    async fn staff(&self) -> Result<Vec<StaffMember>, ApiError>;

    /// Add a back-office account.
    async fn create_staff(&self, member: &NewStaffMember) -> Result<StaffMember, ApiError>;

    /// Remove a back-office account.
    async fn delete_staff(&self, id: &UserId) -> Result<(), ApiError>;

    /// Every order, for the order management board.
    async fn all_orders(&self) -> Result<Vec<Order>, ApiError>;

    /// Move an order along its fulfilment steps.
    async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError>;

    /// Sales between two days, inclusive.
    async fn sales_report(&self, from: Date, to: Date) -> Result<SalesReport, ApiError>;

    /// Payment attempts.
    async fn payments(&self) -> Result<Vec<PaymentRecord>, ApiError>;

    /// Dashboard headline numbers.
    async fn dashboard_metrics(&self) -> Result<DashboardMetrics, ApiError>;
}

#[async_trait]
impl AdminApi for ApiClient {
    async fn create_menu_item(&self, item: &MenuItemInput) -> Result<MenuItem, ApiError> {
        self.post("/menu-items", item).await
    }

    async fn update_menu_item(
        &self,
        id: &MenuItemId,
        item: &MenuItemInput,
    ) -> Result<MenuItem, ApiError> {
        self.put(&format!("/menu-items/{id}"), item).await
    }

    async fn delete_menu_item(&self, id: &MenuItemId) -> Result<(), ApiError> {
        self.delete(&format!("/menu-items/{id}")).await
    }

    async fn create_category(&self, category: &CategoryInput) -> Result<Category, ApiError> {
        self.post("/categories", category).await
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        category: &CategoryInput,
    ) -> Result<Category, ApiError> {
        self.put(&format!("/categories/{id}"), category).await
    }

    async fn delete_category(&self, id: &CategoryId) -> Result<(), ApiError> {
        self.delete(&format!("/categories/{id}")).await
    }

    async fn create_location(&self, location: &LocationInput) -> Result<Location, ApiError> {
        self.post("/locations", location).await
    }

    async fn update_location(
        &self,
        id: &LocationId,
        location: &LocationInput,
    ) -> Result<Location, ApiError> {
        self.put(&format!("/locations/{id}"), location).await
    }

    async fn delete_location(&self, id: &LocationId) -> Result<(), ApiError> {
        self.delete(&format!("/locations/{id}")).await
    }

    async fn create_delivery_service(
        &self,
        service: &DeliveryServiceInput,
    ) -> Result<DeliveryService, ApiError> {
        self.post("/delivery-services", service).await
    }

    async fn update_delivery_service(
        &self,
        id: &DeliveryServiceId,
        service: &DeliveryServiceInput,
    ) -> Result<DeliveryService, ApiError> {
        self.put(&format!("/delivery-services/{id}"), service).await
    }

    async fn delete_delivery_service(&self, id: &DeliveryServiceId) -> Result<(), ApiError> {
        self.delete(&format!("/delivery-services/{id}")).await
    }

    async fn staff(&self) -> Result<Vec<StaffMember>, ApiError> {
        self.get("/staff").await
    }

    async fn create_staff(&self, member: &NewStaffMember) -> Result<StaffMember, ApiError> {
        self.post("/staff", member).await
    }

    async fn delete_staff(&self, id: &UserId) -> Result<(), ApiError> {
        self.delete(&format!("/staff/{id}")).await
    }

    async fn all_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.get("/orders").await
    }

    async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        self.put(
            &format!("/orders/{id}/status"),
            &serde_json::json!({ "status": status }),
        )
        .await
    }

    async fn sales_report(&self, from: Date, to: Date) -> Result<SalesReport, ApiError> {
        self.get(&format!("/reports/sales?from={from}&to={to}"))
            .await
    }

    async fn payments(&self) -> Result<Vec<PaymentRecord>, ApiError> {
        self.get("/payments").await
    }

    async fn dashboard_metrics(&self) -> Result<DashboardMetrics, ApiError> {
        self.get("/dashboard/metrics").await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use crate::{config::ClientConfig, http::test_server::respond_once};

    use super::*;

    fn client_for(addr: std::net::SocketAddr) -> Result<ApiClient, ApiError> {
        ApiClient::new(ClientConfig {
            base_url: format!("http://{addr}/api"),
            timeout: Duration::from_secs(5),
        })
    }

    #[tokio::test]
    async fn update_order_status_sends_wire_name() -> TestResult {
        let (addr, request) = respond_once(
            "200 OK",
            r#"{
                "id": 9, "items": [], "orderType": "pickup", "status": "READY",
                "paymentStatus": "PAID", "subtotal": 0, "tax": 0, "total": 0,
                "createdAt": "2024-05-01T12:00:00Z"
            }"#,
        )
        .await?;

        let order = client_for(addr)?
            .update_order_status(&OrderId::new("9"), OrderStatus::Ready)
            .await?;

        assert_eq!(order.status, OrderStatus::Ready);

        let request = request.await?;

        assert!(request.starts_with("PUT /api/orders/9/status "));
        assert!(request.contains(r#"{"status":"READY"}"#));

        Ok(())
    }

    #[tokio::test]
    async fn sales_report_passes_date_range() -> TestResult {
        let (addr, request) = respond_once(
            "200 OK",
            r#"{
                "from": "2024-05-01", "to": "2024-05-07", "totalOrders": 42, "totalRevenue": 12345.5,
                "daily": [{"date": "2024-05-01", "orders": 6, "revenue": 1800}]
            }"#,
        )
        .await?;

        let report = client_for(addr)?
            .sales_report(
                Date::new(2024, 5, 1)?,
                Date::new(2024, 5, 7)?,
            )
            .await?;

        assert_eq!(report.total_orders, 42);
        assert_eq!(report.daily.len(), 1);
        assert!(
            request
                .await?
                .starts_with("GET /api/reports/sales?from=2024-05-01&to=2024-05-07 ")
        );

        Ok(())
    }

    #[tokio::test]
    async fn staff_creation_posts_payload() -> TestResult {
        let (addr, request) = respond_once(
            "201 Created",
            r#"{"id": 3, "name": "Ravi", "email": "ravi@example.com", "role": "STAFF"}"#,
        )
        .await?;

        let member = client_for(addr)?
            .create_staff(&NewStaffMember {
                name: "Ravi".to_string(),
                email: "ravi@example.com".to_string(),
                password: "hunter2".to_string(),
                role: Role::Staff,
            })
            .await?;

        assert_eq!(member.id, UserId::new("3"));

        let request = request.await?;

        assert!(request.starts_with("POST /api/staff "));
        assert!(request.contains(r#""role":"STAFF""#));

        Ok(())
    }
}
