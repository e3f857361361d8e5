//! Checkout bill breakdown.
//!
//! | Line         | Rule                                        |
//! |--------------|---------------------------------------------|
//! | Item total   | sum of price x quantity                     |
//! | Delivery fee | free above ₹999, otherwise ₹49              |
//! | Platform fee | ₹5 per non-empty cart                       |
//! | GST          | 18% of item total, rounded to whole rupees  |

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Item totals strictly above this ship free.
pub const FREE_DELIVERY_THRESHOLD: Decimal = Decimal::from_parts(999, 0, 0, false, 0);

/// Delivery fee below the free-delivery threshold.
pub const DELIVERY_FEE: Decimal = Decimal::from_parts(49, 0, 0, false, 0);

/// Flat platform fee.
pub const PLATFORM_FEE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// GST rate (18%).
pub const GST_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Amounts payable for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    pub item_total: Decimal,
    pub delivery_fee: Decimal,
    pub platform_fee: Decimal,
    pub gst: Decimal,
    pub total: Decimal,
}

impl Bill {
    /// Compute the bill for an item total.
    ///
    /// An empty cart owes nothing, so `has_items == false` yields an all-zero
    /// bill regardless of `item_total`.
    #[must_use]
    pub fn for_items(item_total: Decimal, has_items: bool) -> Self {
        if !has_items {
            return Self::zero();
        }

        let delivery_fee = if item_total > FREE_DELIVERY_THRESHOLD {
            Decimal::ZERO
        } else {
            DELIVERY_FEE
        };
        let gst = item_total
            .saturating_mul(GST_RATE)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

        Self {
            item_total,
            delivery_fee,
            platform_fee: PLATFORM_FEE,
            gst,
            total: item_total
                .saturating_add(delivery_fee)
                .saturating_add(PLATFORM_FEE)
                .saturating_add(gst),
        }
    }

    /// The bill of an empty cart.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            item_total: Decimal::ZERO,
            delivery_fee: Decimal::ZERO,
            platform_fee: Decimal::ZERO,
            gst: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    /// Whether delivery is free for this bill.
    #[must_use]
    pub fn free_delivery(&self) -> bool {
        self.delivery_fee.is_zero()
    }
}
