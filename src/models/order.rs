use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// Enum representing the possible statuses of an order.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Status pool in the order the generator cycles through it.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Parses a wire status, falling back to `Pending` for anything unknown.
    pub fn parse_lenient(input: &str) -> Self {
        input.parse().unwrap_or(OrderStatus::Pending)
    }
}

/// A generated sales order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,

    /// Stringified id of the ordering customer.
    pub customer_id: String,

    pub stock_id: u64,

    /// Units ordered, always within `1..=5`.
    pub quantity: u32,

    /// Unit price times quantity, in whole currency units.
    pub total_amount: i64,

    /// Current status of the order.
    pub status: OrderStatus,

    /// Expected delivery date for the order.
    pub delivery_date: DateTime<Utc>,

    /// Timestamp when the order was created.
    pub created_at: DateTime<Utc>,

    /// Timestamp when the order was last updated.
    pub updated_at: DateTime<Utc>,
}
