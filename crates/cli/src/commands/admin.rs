//! Catalog management commands.
//!
//! # Usage
//!
//! ```bash
//! fitkart login -e admin@fitkart.in
//! fitkart admin add -n "Creatine Monohydrate" -c protein -p 799 -o 999 -b "FitLabs"
//! fitkart admin update p-1712345678901 --price 749 --out-of-stock
//! fitkart admin delete p-1712345678901
//! ```
//!
//! Every command requires an admin session.

use chrono::Utc;
use fitkart_core::{Category, Product, ProductId};
use fitkart_storefront::Store;
use fitkart_storefront::catalog::NewProduct;
use fitkart_storefront::storage::KeyValueStore;
use rust_decimal::Decimal;
use tracing::info;

use super::{CommandError, find_product, require_admin};

/// Optional field changes for an existing product.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub price: Option<Decimal>,
    pub original_price: Option<Decimal>,
    pub image: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
}

impl ProductChanges {
    fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(original_price) = self.original_price {
            product.original_price = original_price;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(brand) = self.brand {
            product.brand = brand;
        }
        if let Some(in_stock) = self.in_stock {
            product.in_stock = in_stock;
        }
        if let Some(featured) = self.featured {
            product.is_featured = Some(featured);
        }
    }
}

/// List a new product at the top of the catalog.
///
/// # Errors
///
/// Returns `CommandError::LoginRequired` or `CommandError::AdminRequired`
/// for a non-admin session.
pub fn add<S: KeyValueStore>(
    store: &mut Store<S>,
    draft: NewProduct,
) -> Result<ProductId, CommandError> {
    require_admin(store)?;

    let product = draft.into_product(Utc::now());
    let id = product.id.clone();
    info!("Adding product {}: {}", id, product.name);
    store.add_product(product);
    Ok(id)
}

/// Change fields of an existing product.
///
/// # Errors
///
/// Returns an access error for a non-admin session and
/// `CommandError::ProductNotFound` for an unknown id.
pub fn update<S: KeyValueStore>(
    store: &mut Store<S>,
    id: &ProductId,
    changes: ProductChanges,
) -> Result<(), CommandError> {
    require_admin(store)?;

    let mut product = find_product(store, id)?.clone();
    changes.apply(&mut product);
    info!("Updating product {}: {}", id, product.name);
    store.update_product(product);
    Ok(())
}

/// Remove a product from the catalog. Cart lines for it are left alone.
///
/// # Errors
///
/// Returns an access error for a non-admin session and
/// `CommandError::ProductNotFound` for an unknown id.
pub fn delete<S: KeyValueStore>(store: &mut Store<S>, id: &ProductId) -> Result<(), CommandError> {
    require_admin(store)?;

    let name = find_product(store, id)?.name.clone();
    store.delete_product(id);
    info!("Deleted product {id}: {name}");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fitkart_core::Email;

    use super::super::test_support::{product, store_with};
    use super::*;

    fn draft() -> NewProduct {
        NewProduct {
            name: "Creatine Monohydrate".to_owned(),
            category: Category::Protein,
            price: Decimal::from(799),
            original_price: Decimal::from(999),
            image: String::new(),
            description: "Micronized creatine".to_owned(),
            brand: "FitLabs".to_owned(),
        }
    }

    fn admin_store(products: Vec<Product>) -> Store<fitkart_storefront::storage::MemoryStore> {
        let mut store = store_with(products);
        store.login(Email::parse("admin@fitkart.in").unwrap());
        store
    }

    #[test]
    fn test_add_requires_admin() {
        let mut store = store_with(Vec::new());
        assert!(matches!(add(&mut store, draft()), Err(CommandError::LoginRequired)));

        store.login(Email::parse("riya@gmail.com").unwrap());
        assert!(matches!(add(&mut store, draft()), Err(CommandError::AdminRequired)));
        assert!(store.products().is_empty());
    }

    #[test]
    fn test_add_prepends_with_defaults() {
        let mut store = admin_store(vec![product("p1", 100, 100)]);

        let id = add(&mut store, draft()).unwrap();
        let first = store.products().first().unwrap();
        assert_eq!(first.id, id);
        assert!(id.as_str().starts_with(ProductId::PREFIX));
        assert!((first.rating - NewProduct::DEFAULT_RATING).abs() < f64::EPSILON);
        assert_eq!(first.reviews_count, 0);
        assert!(first.in_stock);
        assert_eq!(store.products().len(), 2);
    }

    #[test]
    fn test_update_applies_changes() {
        let mut store = admin_store(vec![product("p1", 100, 120)]);
        let id = ProductId::new("p1");

        let changes = ProductChanges {
            price: Some(Decimal::from(90)),
            in_stock: Some(false),
            featured: Some(true),
            ..ProductChanges::default()
        };
        update(&mut store, &id, changes).unwrap();

        let p1 = store.product(&id).unwrap();
        assert_eq!(p1.price, Decimal::from(90));
        assert_eq!(p1.original_price, Decimal::from(120));
        assert!(!p1.in_stock);
        assert!(p1.featured());
        assert_eq!(p1.name, "Product p1");
    }

    #[test]
    fn test_update_unknown_product() {
        let mut store = admin_store(Vec::new());
        assert!(matches!(
            update(&mut store, &ProductId::new("p9"), ProductChanges::default()),
            Err(CommandError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_delete_keeps_cart_line() {
        let mut store = admin_store(vec![product("p1", 100, 100)]);
        let id = ProductId::new("p1");
        let p1 = store.product(&id).cloned().unwrap();
        store.add(&p1);

        delete(&mut store, &id).unwrap();
        assert!(store.products().is_empty());
        assert_eq!(store.cart_quantity(&id), 1);
    }
}
