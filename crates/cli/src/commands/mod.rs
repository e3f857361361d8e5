//! Command implementations.
//!
//! Each command works against a [`Store`] over any storage backend and
//! reports through `tracing`. The access guards here (sign-in, admin, empty
//! cart) belong to the front end; the store itself accepts every call.

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod orders;

use fitkart_core::{EmailError, Product, ProductId, User};
use fitkart_storefront::Store;
use fitkart_storefront::StoreError;
use fitkart_storefront::config::ConfigError;
use fitkart_storefront::storage::KeyValueStore;
use thiserror::Error;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The store could not be opened or flushed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The email typed at login is not usable.
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    /// The command needs a signed-in user.
    #[error("Please login to continue")]
    LoginRequired,

    /// The command needs an admin user.
    #[error("Access denied. Admins only.")]
    AdminRequired,

    /// Checkout was attempted with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// No catalog product has the given id.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),
}

/// The signed-in user, or `LoginRequired`.
pub(crate) fn require_user<S: KeyValueStore>(store: &Store<S>) -> Result<&User, CommandError> {
    store.user().ok_or(CommandError::LoginRequired)
}

/// Fail unless the signed-in user is an admin.
pub(crate) fn require_admin<S: KeyValueStore>(store: &Store<S>) -> Result<(), CommandError> {
    if require_user(store)?.is_admin {
        Ok(())
    } else {
        Err(CommandError::AdminRequired)
    }
}

/// Look up a catalog product by id, or `ProductNotFound`.
pub(crate) fn find_product<'a, S: KeyValueStore>(
    store: &'a Store<S>,
    id: &ProductId,
) -> Result<&'a Product, CommandError> {
    store
        .product(id)
        .ok_or_else(|| CommandError::ProductNotFound(id.clone()))
}

/// One-line product summary for listings.
pub(crate) fn product_line(product: &Product) -> String {
    let mut line = format!(
        "{:<8} {} [{}] {} by {}",
        product.id.as_str(),
        product.name,
        product.category,
        product.selling_price(),
        product.brand,
    );
    if let Some(percent) = product.discount_percent() {
        line.push_str(&format!(" ({percent}% OFF {})", product.list_price()));
    }
    line.push_str(&format!(" rating {:.1}", product.rating));
    if !product.in_stock {
        line.push_str(" (out of stock)");
    }
    line
}

#[cfg(test)]
pub(crate) mod test_support {
    use fitkart_core::Category;
    use fitkart_storefront::StorageLayout;
    use fitkart_storefront::catalog::NewProduct;
    use fitkart_storefront::storage::MemoryStore;
    use rust_decimal::Decimal;

    use super::*;

    pub(crate) fn product(id: &str, price: i64, original_price: i64) -> Product {
        let mut product = NewProduct {
            name: format!("Product {id}"),
            category: Category::Protein,
            price: Decimal::from(price),
            original_price: Decimal::from(original_price),
            image: String::new(),
            description: String::new(),
            brand: "FitKart".to_owned(),
        }
        .into_product(chrono::Utc::now());
        product.id = ProductId::new(id);
        product
    }

    #[allow(clippy::unwrap_used)]
    pub(crate) fn store_with(products: Vec<Product>) -> Store<MemoryStore> {
        Store::open(MemoryStore::new(), StorageLayout::Split, move || Ok(products)).unwrap()
    }
}
