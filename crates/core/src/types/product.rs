//! Catalog product record.

use std::collections::BTreeMap;

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;
use super::status::Category;

/// A purchasable product.
///
/// Field names serialize in camelCase (`originalPrice`, `reviewsCount`) and
/// amounts as JSON numbers, matching the persisted record format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    /// Selling price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// List price before discount. Expected to be at least `price`.
    #[serde(with = "rust_decimal::serde::float")]
    pub original_price: Decimal,
    /// Image URL or asset reference.
    pub image: String,
    pub description: String,
    /// Average rating out of 5.
    pub rating: f64,
    pub reviews_count: u32,
    pub brand: String,
    pub in_stock: bool,
    /// Pack size, e.g. "2 kg" or "1 Unit".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_facts: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    /// Delivery promise, e.g. "10 mins".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_time: Option<String>,
}

impl Product {
    /// Selling price with currency.
    #[must_use]
    pub const fn selling_price(&self) -> Price {
        Price::inr(self.price)
    }

    /// List price with currency.
    #[must_use]
    pub const fn list_price(&self) -> Price {
        Price::inr(self.original_price)
    }

    /// Whether the product is flagged for the home page.
    #[must_use]
    pub fn featured(&self) -> bool {
        self.is_featured.unwrap_or(false)
    }

    /// Discount off the list price as a whole percentage.
    ///
    /// Returns `None` when there is no discount or the list price is not
    /// positive. Rounds half away from zero (`33.5%` shows as `34%`).
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        if self.original_price <= Decimal::ZERO || self.original_price <= self.price {
            return None;
        }

        self.original_price
            .checked_sub(self.price)?
            .checked_div(self.original_price)?
            .checked_mul(Decimal::ONE_HUNDRED)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Minimal product for tests.
    pub(crate) fn product(id: &str, price: i64, original_price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            category: Category::Protein,
            price: Decimal::from(price),
            original_price: Decimal::from(original_price),
            image: format!("https://img.fitkart.in/{id}.jpg"),
            description: String::new(),
            rating: 4.0,
            reviews_count: 0,
            brand: "FitKart".to_owned(),
            in_stock: true,
            weight: None,
            nutrition_facts: None,
            is_featured: None,
            delivery_time: None,
        }
    }
}
