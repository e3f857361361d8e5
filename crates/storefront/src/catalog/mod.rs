//! Catalog browsing and admin product drafts.
//!
//! Query helpers take the catalog as a slice and return borrowed products in
//! display order; they never mutate the catalog.

mod seed;

use core::fmt;

use chrono::{DateTime, Utc};
use fitkart_core::{Category, Product, ProductId};
use rust_decimal::Decimal;

pub use seed::{CatalogSeed, SeedError, default_catalog, load_seed_file, parse_seed, validate_seed};

/// Number of featured products shown on the home page.
pub const FEATURED_LIMIT: usize = 5;

/// Product ordering for category listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Highest rated first.
    #[default]
    Popular,
    PriceLowToHigh,
    PriceHighToLow,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Popular => write!(f, "popular"),
            Self::PriceLowToHigh => write!(f, "price-low"),
            Self::PriceHighToLow => write!(f, "price-high"),
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(Self::Popular),
            "price-low" => Ok(Self::PriceLowToHigh),
            "price-high" => Ok(Self::PriceHighToLow),
            _ => Err(format!(
                "invalid sort order: {s} (expected popular, price-low or price-high)"
            )),
        }
    }
}

/// Filters and ordering for [`browse`].
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Restrict to one category.
    pub category: Option<Category>,
    /// Restrict to one brand (exact match).
    pub brand: Option<String>,
    pub sort: SortBy,
}

/// Filter and sort the catalog. Ties keep catalog order.
#[must_use]
pub fn browse<'a>(products: &'a [Product], query: &CatalogQuery) -> Vec<&'a Product> {
    let mut matches: Vec<&Product> = products
        .iter()
        .filter(|p| query.category.is_none_or(|c| p.category == c))
        .filter(|p| query.brand.as_deref().is_none_or(|b| p.brand == b))
        .collect();

    match query.sort {
        SortBy::Popular => matches.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortBy::PriceLowToHigh => matches.sort_by(|a, b| a.price.cmp(&b.price)),
        SortBy::PriceHighToLow => matches.sort_by(|a, b| b.price.cmp(&a.price)),
    }
    matches
}

/// Distinct brands within a category, in first-seen order.
#[must_use]
pub fn brands(products: &[Product], category: Category) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for product in products.iter().filter(|p| p.category == category) {
        if !seen.contains(&product.brand.as_str()) {
            seen.push(&product.brand);
        }
    }
    seen
}

/// The first `limit` featured products in catalog order.
#[must_use]
pub fn featured(products: &[Product], limit: usize) -> Vec<&Product> {
    products.iter().filter(|p| p.featured()).take(limit).collect()
}

/// Case-insensitive substring search over name, brand and category.
///
/// A blank term matches nothing.
#[must_use]
pub fn search<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.brand.to_lowercase().contains(&needle)
                || p.category.as_str().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Look up a product by id.
#[must_use]
pub fn find<'a>(products: &'a [Product], id: &ProductId) -> Option<&'a Product> {
    products.iter().find(|p| &p.id == id)
}

/// Fields the admin form collects for a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: Category,
    pub price: Decimal,
    pub original_price: Decimal,
    pub image: String,
    pub description: String,
    pub brand: String,
}

impl NewProduct {
    /// Default rating for a freshly listed product.
    pub const DEFAULT_RATING: f64 = 4.5;
    /// Default pack size.
    pub const DEFAULT_WEIGHT: &'static str = "1 Unit";
    /// Default delivery promise.
    pub const DEFAULT_DELIVERY_TIME: &'static str = "24 hrs";

    /// Complete the draft with the admin defaults and a time-derived id.
    #[must_use]
    pub fn into_product(self, at: DateTime<Utc>) -> Product {
        Product {
            id: ProductId::from_timestamp(at),
            name: self.name,
            category: self.category,
            price: self.price,
            original_price: self.original_price,
            image: self.image,
            description: self.description,
            rating: Self::DEFAULT_RATING,
            reviews_count: 0,
            brand: self.brand,
            in_stock: true,
            weight: Some(Self::DEFAULT_WEIGHT.to_owned()),
            nutrition_facts: None,
            is_featured: None,
            delivery_time: Some(Self::DEFAULT_DELIVERY_TIME.to_owned()),
        }
    }
}
