//! Checkout
//!
//! Turns the cart into an order request. The displayed tax is informational; the backend computes
//! the amount actually charged.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    auth::validation::{FieldErrors, validate_phone, validate_required},
    cart::{Cart, OrderType},
    menu::models::{DeliveryServiceId, LocationId, MenuItemId},
    money::{percent_of, tax_rate},
};

/// Amounts shown on the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    /// Sum of line totals
    pub subtotal: Decimal,

    /// 10% of the subtotal, rounded to two places
    pub tax: Decimal,

    /// `subtotal + tax`
    pub total: Decimal,
}

impl CheckoutSummary {
    /// Compute the summary for the cart's current contents.
    #[must_use]
    pub fn for_cart(cart: &Cart) -> Self {
        Self::for_subtotal(cart.subtotal())
    }

    /// Compute the summary for a subtotal.
    #[must_use]
    pub fn for_subtotal(subtotal: Decimal) -> Self {
        let tax = percent_of(subtotal, tax_rate());

        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Cash on pickup or delivery
    #[default]
    Cash,

    /// Online payment gateway
    Online,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cash => "cash",
            Self::Online => "online",
        })
    }
}

/// Customer input collected on the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutDetails {
    /// Name for the order
    pub customer_name: String,

    /// Contact phone
    pub phone: String,

    /// Street address, required for delivery
    pub delivery_address: Option<String>,

    /// Chosen delivery partner
    pub delivery_service_id: Option<DeliveryServiceId>,

    /// Free-text kitchen notes
    pub notes: Option<String>,

    /// Payment method
    pub payment_method: PaymentMethod,
}

/// One requested line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequestLine {
    /// Menu item
    pub menu_item_id: MenuItemId,

    /// Units
    pub quantity: u32,
}

/// Body of the create-order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// Requested lines
    pub items: Vec<OrderRequestLine>,

    /// Pickup or delivery
    pub order_type: OrderType,

    /// Pickup location (pickup orders only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,

    /// Name for the order
    pub customer_name: String,

    /// Contact phone, normalised to 10 digits
    pub phone: String,

    /// Delivery address (delivery orders only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,

    /// Delivery partner (delivery orders only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_service_id: Option<DeliveryServiceId>,

    /// Kitchen notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Payment method
    pub payment_method: PaymentMethod,
}

/// Reasons an order cannot be submitted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Nothing to order
    #[error("Your cart is empty")]
    EmptyCart,

    /// Pickup order without a pickup location
    #[error("Select a pickup location")]
    MissingPickupLocation,

    /// Delivery order without an address
    #[error("Enter a delivery address")]
    MissingDeliveryAddress,

    /// One or more form fields are invalid
    #[error("Please correct the highlighted fields")]
    Validation(FieldErrors),
}

/// Validate the cart and form and build the create-order request.
///
/// Delivery orders never carry a pickup location, even if one is still selected in the cart.
///
/// # Errors
///
/// Returns a [`CheckoutError`] describing the first blocking problem, or every invalid field at
/// once for [`CheckoutError::Validation`].
pub fn prepare_order(cart: &Cart, details: &CheckoutDetails) -> Result<OrderRequest, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let delivery_address = non_blank(details.delivery_address.as_deref());

    let (location_id, delivery_address, delivery_service_id) = match cart.order_type() {
        OrderType::Pickup => {
            let location = cart
                .selected_location_id()
                .cloned()
                .ok_or(CheckoutError::MissingPickupLocation)?;

            (Some(location), None, None)
        }
        OrderType::Delivery => {
            let address = delivery_address.ok_or(CheckoutError::MissingDeliveryAddress)?;

            (None, Some(address), details.delivery_service_id.clone())
        }
    };

    let mut errors = FieldErrors::new();

    let customer_name = errors
        .check(
            "customerName",
            validate_required("customerName", &details.customer_name),
        )
        .map(str::to_string);

    let phone = errors.check("phone", validate_phone(&details.phone));

    let (Some(customer_name), Some(phone)) = (customer_name, phone) else {
        return Err(CheckoutError::Validation(errors));
    };

    let items = cart
        .items()
        .iter()
        .map(|line| OrderRequestLine {
            menu_item_id: line.id().clone(),
            quantity: line.quantity(),
        })
        .collect();

    debug!(
        order_type = %cart.order_type(),
        lines = cart.items().len(),
        "prepared order request"
    );

    Ok(OrderRequest {
        items,
        order_type: cart.order_type(),
        location_id,
        customer_name,
        phone,
        delivery_address,
        delivery_service_id,
        notes: non_blank(details.notes.as_deref()),
        payment_method: details.payment_method,
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{auth::validation::FieldError, cart::NewLineItem};

    use super::*;

    fn item(id: &str, price: Decimal) -> NewLineItem {
        NewLineItem {
            id: MenuItemId::new(id),
            name: format!("Item {id}"),
            description: String::new(),
            price,
            category: "Momo".to_string(),
            image: None,
            vegetarian: None,
        }
    }

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            customer_name: "Asha".to_string(),
            phone: "9841234567".to_string(),
            ..CheckoutDetails::default()
        }
    }

    fn pickup_cart() -> Cart {
        let mut cart = Cart::new();

        cart.add_item(item("a", Decimal::from(180)), 2);
        cart.set_selected_location_id(Some(LocationId::new("loc-1")));

        cart
    }

    #[test]
    fn summary_adds_ten_percent_tax() {
        let summary = CheckoutSummary::for_subtotal(Decimal::new(36_000, 2));

        assert_eq!(summary.tax, Decimal::new(3_600, 2));
        assert_eq!(summary.total, Decimal::new(39_600, 2));
    }

    #[test]
    fn summary_rounds_tax_to_cents() {
        let summary = CheckoutSummary::for_subtotal(Decimal::new(1_005, 2));

        assert_eq!(summary.tax, Decimal::new(101, 2));
        assert_eq!(summary.total, Decimal::new(1_106, 2));
    }

    #[test]
    fn summary_of_empty_cart_is_zero() {
        let summary = CheckoutSummary::for_cart(&Cart::new());

        assert_eq!(summary.total, Decimal::ZERO);
    }

    #[test]
    fn empty_cart_is_rejected() {
        assert_eq!(
            prepare_order(&Cart::new(), &details()),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn pickup_needs_a_location() {
        let mut cart = pickup_cart();
        cart.set_selected_location_id(None);

        assert_eq!(
            prepare_order(&cart, &details()),
            Err(CheckoutError::MissingPickupLocation)
        );
    }

    #[test]
    fn pickup_request_carries_location() -> TestResult {
        let request = prepare_order(&pickup_cart(), &details())?;

        assert_eq!(request.order_type, OrderType::Pickup);
        assert_eq!(request.location_id, Some(LocationId::new("loc-1")));
        assert_eq!(
            request.items,
            vec![OrderRequestLine {
                menu_item_id: MenuItemId::new("a"),
                quantity: 2,
            }]
        );

        Ok(())
    }

    #[test]
    fn delivery_needs_an_address() {
        let mut cart = pickup_cart();
        cart.set_order_type(OrderType::Delivery);

        let result = prepare_order(
            &cart,
            &CheckoutDetails {
                delivery_address: Some("   ".to_string()),
                ..details()
            },
        );

        assert_eq!(result, Err(CheckoutError::MissingDeliveryAddress));
    }

    #[test]
    fn delivery_drops_stale_pickup_location() -> TestResult {
        let mut cart = pickup_cart();
        cart.set_order_type(OrderType::Delivery);

        let request = prepare_order(
            &cart,
            &CheckoutDetails {
                delivery_address: Some("Jhamsikhel, Lalitpur".to_string()),
                delivery_service_id: Some(DeliveryServiceId::new("ds-1")),
                ..details()
            },
        )?;

        assert_eq!(request.location_id, None);
        assert_eq!(
            request.delivery_address.as_deref(),
            Some("Jhamsikhel, Lalitpur")
        );
        assert_eq!(request.delivery_service_id, Some(DeliveryServiceId::new("ds-1")));

        Ok(())
    }

    #[test]
    fn invalid_fields_are_reported_together() {
        let result = prepare_order(
            &pickup_cart(),
            &CheckoutDetails {
                customer_name: " ".to_string(),
                phone: "123".to_string(),
                ..CheckoutDetails::default()
            },
        );

        let Err(CheckoutError::Validation(errors)) = result else {
            panic!("expected validation errors, got {result:?}");
        };

        assert_eq!(
            errors.get("customerName"),
            Some(&FieldError::Required("customerName"))
        );
        assert_eq!(errors.get("phone"), Some(&FieldError::InvalidPhone));
    }

    #[test]
    fn request_serializes_camel_case() -> TestResult {
        let request = prepare_order(
            &pickup_cart(),
            &CheckoutDetails {
                notes: Some("extra achar".to_string()),
                payment_method: PaymentMethod::Online,
                ..details()
            },
        )?;

        let json = serde_json::to_value(&request)?;

        assert_eq!(json["orderType"], "pickup");
        assert_eq!(json["locationId"], "loc-1");
        assert_eq!(json["paymentMethod"], "ONLINE");
        assert_eq!(json["items"][0]["menuItemId"], "a");
        assert!(json.get("deliveryAddress").is_none());

        Ok(())
    }
}
