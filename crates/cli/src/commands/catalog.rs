//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! fitkart catalog list --category protein --sort price-low
//! fitkart catalog show p1
//! fitkart catalog search whey
//! fitkart catalog featured
//! fitkart catalog brands protein
//! ```

use fitkart_core::{Category, ProductId};
use fitkart_storefront::Store;
use fitkart_storefront::catalog::{self, CatalogQuery};
use fitkart_storefront::storage::KeyValueStore;
use tracing::info;

use super::{CommandError, find_product, product_line};

/// List products, optionally filtered and sorted.
pub fn list<S: KeyValueStore>(store: &Store<S>, query: &CatalogQuery) {
    let products = catalog::browse(store.products(), query);

    match query.category {
        Some(category) => info!("{category}: {} products (sorted by {})", products.len(), query.sort),
        None => info!("All products: {} (sorted by {})", products.len(), query.sort),
    }
    if products.is_empty() {
        info!("  No products found in this category.");
    }
    for product in products {
        info!("  {}", product_line(product));
    }
}

/// Show a product's full details.
///
/// # Errors
///
/// Returns `CommandError::ProductNotFound` for an unknown id.
pub fn show<S: KeyValueStore>(store: &Store<S>, id: &ProductId) -> Result<(), CommandError> {
    let product = find_product(store, id)?;

    info!("{}", product.name);
    info!("  Id:          {}", product.id);
    info!("  Brand:       {}", product.brand);
    info!("  Category:    {}", product.category);
    info!("  Price:       {}", product.selling_price());
    if let Some(percent) = product.discount_percent() {
        info!("  MRP:         {} ({percent}% Discount)", product.list_price());
    }
    info!(
        "  Rating:      {:.1} ({} reviews)",
        product.rating, product.reviews_count
    );
    info!(
        "  Availability: {}",
        if product.in_stock { "In stock" } else { "Out of stock" }
    );
    if let Some(weight) = &product.weight {
        info!("  Weight:      {weight}");
    }
    if let Some(delivery) = &product.delivery_time {
        info!("  Delivery:    {delivery}");
    }
    if !product.description.is_empty() {
        info!("  {}", product.description);
    }
    if let Some(facts) = &product.nutrition_facts {
        info!("  Nutrition facts:");
        for (name, value) in facts {
            info!("    {name}: {value}");
        }
    }

    let in_cart = store.cart_quantity(id);
    if in_cart > 0 {
        info!("  In your cart: {in_cart}");
    }
    Ok(())
}

/// Search by name, brand or category.
pub fn search<S: KeyValueStore>(store: &Store<S>, term: &str) {
    let results = catalog::search(store.products(), term);
    info!("{} results for \"{}\"", results.len(), term.trim());
    for product in results {
        info!("  {}", product_line(product));
    }
}

/// Show the home page's featured products.
pub fn featured<S: KeyValueStore>(store: &Store<S>, limit: usize) {
    info!("Featured products:");
    for product in catalog::featured(store.products(), limit) {
        info!("  {}", product_line(product));
    }
}

/// List the brands sold in a category.
pub fn brands<S: KeyValueStore>(store: &Store<S>, category: Category) {
    let brands = catalog::brands(store.products(), category);
    info!("{category} brands: {}", brands.join(", "));
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{product, store_with};
    use super::*;

    #[test]
    fn test_show_unknown_product() {
        let store = store_with(vec![product("p1", 100, 120)]);
        assert!(matches!(
            show(&store, &ProductId::new("missing")),
            Err(CommandError::ProductNotFound(_))
        ));
        assert!(show(&store, &ProductId::new("p1")).is_ok());
    }
}
