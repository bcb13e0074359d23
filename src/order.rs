//! Orders

use std::fmt;

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    cart::OrderType,
    ids::TypedId,
    menu::models::{LocationId, MenuItemId},
};

/// Order id
pub type OrderId = TypedId<Order>;

/// Fulfilment status reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Placed, not yet accepted
    Pending,

    /// Accepted by the kitchen
    Confirmed,

    /// Being cooked
    Preparing,

    /// Ready for pickup or handover to a rider
    Ready,

    /// With a rider
    OutForDelivery,

    /// Collected or delivered
    Completed,

    /// Cancelled
    Cancelled,
}

impl OrderStatus {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Order placed",
            Self::Confirmed => "Confirmed",
            Self::Preparing => "Preparing",
            Self::Ready => "Ready",
            Self::OutForDelivery => "Out for delivery",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Payment status reported by the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Awaiting payment
    #[default]
    Pending,

    /// Paid
    Paid,

    /// Payment attempt failed
    Failed,

    /// Refunded
    Refunded,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Failed => "Failed",
            Self::Refunded => "Refunded",
        })
    }
}

/// One line of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Menu item ordered
    pub menu_item_id: MenuItemId,

    /// Item name at the time of ordering
    pub name: String,

    /// Unit price at the time of ordering
    pub price: Decimal,

    /// Units ordered
    pub quantity: u32,
}

impl OrderLine {
    /// `price × quantity`
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A placed order as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id
    pub id: OrderId,

    /// Ordered lines
    pub items: Vec<OrderLine>,

    /// Pickup or delivery
    pub order_type: OrderType,

    /// Pickup location
    #[serde(default)]
    pub location_id: Option<LocationId>,

    /// Fulfilment status
    pub status: OrderStatus,

    /// Payment status
    #[serde(default)]
    pub payment_status: PaymentStatus,

    /// Sum of line totals
    pub subtotal: Decimal,

    /// Tax charged
    pub tax: Decimal,

    /// Amount due
    pub total: Decimal,

    /// Placement time
    pub created_at: Timestamp,
}

/// Position of a step relative to the order's current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// Already passed
    Done,

    /// Where the order is now
    Current,

    /// Not reached yet
    Upcoming,
}

/// One entry in an order's progress timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineStep {
    /// Status this step represents
    pub status: OrderStatus,

    /// Whether the step is done, current or upcoming
    pub state: StepState,
}

const PICKUP_STEPS: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::Completed,
];

const DELIVERY_STEPS: [OrderStatus; 6] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::Ready,
    OrderStatus::OutForDelivery,
    OrderStatus::Completed,
];

impl Order {
    /// Progress steps for this order's type.
    ///
    /// A completed order has every step done. A cancelled order shows the placed step as done
    /// followed by a current cancelled step, since the backend does not report how far it got.
    #[must_use]
    pub fn timeline(&self) -> Vec<TimelineStep> {
        let steps: &[OrderStatus] = match self.order_type {
            OrderType::Pickup => &PICKUP_STEPS,
            OrderType::Delivery => &DELIVERY_STEPS,
        };

        if self.status == OrderStatus::Cancelled {
            return vec![
                TimelineStep {
                    status: OrderStatus::Pending,
                    state: StepState::Done,
                },
                TimelineStep {
                    status: OrderStatus::Cancelled,
                    state: StepState::Current,
                },
            ];
        }

        // Pickup orders never report OutForDelivery; treat it as Ready if they do.
        let current = steps
            .iter()
            .position(|status| *status == self.status)
            .or_else(|| steps.iter().position(|status| *status == OrderStatus::Ready))
            .unwrap_or(0);

        steps
            .iter()
            .enumerate()
            .map(|(idx, status)| {
                let state = if idx < current || self.status == OrderStatus::Completed {
                    StepState::Done
                } else if idx == current {
                    StepState::Current
                } else {
                    StepState::Upcoming
                };

                TimelineStep {
                    status: *status,
                    state,
                }
            })
            .collect()
    }

    /// Whether the customer can retry payment.
    #[must_use]
    pub fn can_repay(&self) -> bool {
        matches!(
            self.payment_status,
            PaymentStatus::Pending | PaymentStatus::Failed
        ) && self.status != OrderStatus::Cancelled
    }

    /// Total number of units ordered.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
