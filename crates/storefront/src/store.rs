//! The store: catalog, cart, session user and order history.
//!
//! All mutations are synchronous and total. After each one the store writes
//! the affected record through its [`Persistence`]; a failed write is logged
//! and the in-memory state remains authoritative. Call [`Store::flush`] when
//! a confirmed write matters.

use chrono::{DateTime, Utc};
use fitkart_core::{Bill, Cart, CartItem, Email, Order, Product, ProductId, User};
use tracing::instrument;

use crate::catalog;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::persist::{Persistence, Record, StorageLayout, StoreState};
use crate::storage::{FileStore, KeyValueStore};

/// In-memory store state mirrored to durable storage.
#[derive(Debug)]
pub struct Store<S> {
    state: StoreState,
    persistence: Persistence<S>,
}

impl<S: KeyValueStore> Store<S> {
    /// Load state from storage.
    ///
    /// `seed` provides the catalog when none has been persisted; it is only
    /// called in that case. A freshly seeded catalog is written immediately.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if a record cannot be read or parsed, or if the
    /// seed fails.
    pub fn open<F>(storage: S, layout: StorageLayout, seed: F) -> Result<Self>
    where
        F: FnOnce() -> std::result::Result<Vec<Product>, catalog::SeedError>,
    {
        let persistence = Persistence::new(storage, layout);
        let loaded = persistence.load()?;

        let seeded = loaded.products.is_none();
        let products = match loaded.products {
            Some(products) => products,
            None => seed()?,
        };

        let mut store = Self {
            state: StoreState {
                products,
                cart: loaded.cart,
                user: loaded.user,
                orders: loaded.orders,
            },
            persistence,
        };

        tracing::debug!(
            %layout,
            products = store.state.products.len(),
            cart_lines = store.state.cart.len(),
            orders = store.state.orders.len(),
            signed_in = store.state.user.is_some(),
            "Store loaded"
        );

        if seeded {
            tracing::info!(products = store.state.products.len(), "Catalog seeded");
            store.persist(Record::Products);
        }

        Ok(store)
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Full state snapshot.
    #[must_use]
    pub const fn state(&self) -> &StoreState {
        &self.state
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        catalog::find(&self.state.products, id)
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.state.cart
    }

    #[must_use]
    pub fn cart_item(&self, id: &ProductId) -> Option<&CartItem> {
        self.state.cart.get(id)
    }

    /// Quantity of a product in the cart, zero when absent.
    #[must_use]
    pub fn cart_quantity(&self, id: &ProductId) -> u32 {
        self.state.cart.quantity_of(id)
    }

    /// Checkout bill for the current cart.
    #[must_use]
    pub fn bill(&self) -> Bill {
        self.state.cart.bill()
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    /// Whether the session user may use the admin panel.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.state.user.as_ref().is_some_and(|u| u.is_admin)
    }

    /// Order history, newest first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.state.orders
    }

    #[must_use]
    pub const fn layout(&self) -> StorageLayout {
        self.persistence.layout()
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        self.persistence.storage()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of `product` to the cart.
    #[instrument(skip_all, fields(product_id = %product.id))]
    pub fn add(&mut self, product: &Product) {
        self.state.cart.add(product);
        tracing::debug!(
            quantity = self.state.cart.quantity_of(&product.id),
            "Added to cart"
        );
        self.persist(Record::Cart);
    }

    /// Remove a product's line from the cart. Unknown ids are ignored.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub fn remove(&mut self, product_id: &ProductId) {
        if self.state.cart.remove(product_id) {
            tracing::debug!("Removed from cart");
        }
        self.persist(Record::Cart);
    }

    /// Change a line's quantity by `delta`; a result of zero removes it.
    #[instrument(skip_all, fields(product_id = %product_id, delta = delta))]
    pub fn change_quantity(&mut self, product_id: &ProductId, delta: i64) {
        if let Some(quantity) = self.state.cart.change_quantity(product_id, delta) {
            tracing::debug!(quantity, "Cart quantity changed");
        }
        self.persist(Record::Cart);
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.state.cart.clear();
        tracing::debug!("Cart cleared");
        self.persist(Record::Cart);
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Sign in as the user derived from `email`, replacing any current user.
    #[instrument(skip_all)]
    pub fn login(&mut self, email: Email) {
        let user = User::from_email(email);
        tracing::info!(is_admin = user.is_admin, "User signed in");
        self.state.user = Some(user);
        self.persist(Record::User);
    }

    /// Sign out.
    pub fn logout(&mut self) {
        if self.state.user.take().is_some() {
            tracing::info!("User signed out");
        }
        self.persist(Record::User);
    }

    // =========================================================================
    // Catalog (admin)
    // =========================================================================

    /// List a product at the top of the catalog.
    #[instrument(skip_all, fields(product_id = %product.id))]
    pub fn add_product(&mut self, product: Product) {
        self.state.products.insert(0, product);
        tracing::info!("Product added");
        self.persist(Record::Products);
    }

    /// Delete a product from the catalog.
    ///
    /// Cart lines and past orders keep their own copies of the product.
    #[instrument(skip_all, fields(product_id = %id))]
    pub fn delete_product(&mut self, id: &ProductId) {
        let before = self.state.products.len();
        self.state.products.retain(|p| &p.id != id);
        if self.state.products.len() != before {
            tracing::info!("Product deleted");
        }
        self.persist(Record::Products);
    }

    /// Replace every catalog record whose id matches `product.id`.
    #[instrument(skip_all, fields(product_id = %product.id))]
    pub fn update_product(&mut self, product: Product) {
        let mut replaced = 0_usize;
        for existing in self.state.products.iter_mut().filter(|p| p.id == product.id) {
            existing.clone_from(&product);
            replaced += 1;
        }
        if replaced > 0 {
            tracing::info!(replaced, "Product updated");
        }
        self.persist(Record::Products);
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Check out the cart now. See [`Store::place_order_at`].
    pub fn place_order(&mut self) -> Order {
        self.place_order_at(Utc::now())
    }

    /// Turn the cart into an order placed at `at` and return a copy of it.
    ///
    /// The order takes the cart lines by value and goes to the front of the
    /// history; the cart is left empty. There is no guard against an empty
    /// cart or a repeated call.
    #[instrument(skip(self))]
    pub fn place_order_at(&mut self, at: DateTime<Utc>) -> Order {
        let order = Order::place(self.state.cart.take_items(), at);
        tracing::info!(
            order_id = %order.id,
            lines = order.items.len(),
            total = %order.total(),
            "Order placed"
        );
        self.state.orders.insert(0, order.clone());

        self.persist(Record::Orders);
        self.persist(Record::Cart);
        order
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write every record now.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if any write fails.
    pub fn flush(&mut self) -> Result<()> {
        self.persistence.save_all(&self.state)
    }

    /// Release the storage backend.
    pub fn into_storage(self) -> S {
        self.persistence.into_storage()
    }

    fn persist(&mut self, record: Record) {
        if let Err(e) = self.persistence.save(&self.state, record) {
            tracing::warn!(record = record.key(), error = %e, "Failed to persist store record");
        }
    }
}

impl Store<FileStore> {
    /// Open the file-backed store described by `config`.
    ///
    /// The catalog seed comes from `config.catalog_file` when set, otherwise
    /// from the bundled catalog.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the data directory cannot be opened, a record
    /// is corrupt, or the seed fails to load.
    pub fn open_with_config(config: &StorefrontConfig) -> Result<Self> {
        let storage = FileStore::open(&config.data_dir)?;
        let catalog_file = config.catalog_file.as_deref();
        Self::open(storage, config.layout, || match catalog_file {
            Some(path) => catalog::load_seed_file(path),
            None => catalog::default_catalog(),
        })
    }
}
