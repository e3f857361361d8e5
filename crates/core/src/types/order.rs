//! Placed orders.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartItem;
use super::id::OrderId;
use super::price::Price;
use super::status::OrderStatus;

/// An immutable record of a checkout.
///
/// `items` is an owned copy of the cart lines at placement time; later cart
/// changes never reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<CartItem>,
    /// Sum of price x quantity over `items`. Fees and GST are not included.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    /// When the order was placed.
    pub date: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    /// Create an order from cart lines placed at `at`.
    ///
    /// The order is delivered on creation; there is no fulfilment flow.
    #[must_use]
    pub fn place(items: Vec<CartItem>, at: DateTime<Utc>) -> Self {
        let total_amount = CartItem::total_of(&items);
        Self {
            id: OrderId::from_timestamp(at),
            items,
            total_amount,
            date: at,
            status: OrderStatus::Delivered,
        }
    }

    /// Order total with currency.
    #[must_use]
    pub const fn total(&self) -> Price {
        Price::inr(self.total_amount)
    }

    /// Total number of units in the order.
    #[must_use]
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}
