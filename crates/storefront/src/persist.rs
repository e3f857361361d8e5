//! Mapping between store state and storage records.
//!
//! # Layouts
//!
//! - [`StorageLayout::Split`] - independent records per collection:
//!   `fitkart_products`, `fitkart_cart`, `fitkart_user`, `fitkart_orders`.
//!   A write touches only the collection that changed.
//! - [`StorageLayout::Snapshot`] - a single `fitkart_state` record holding
//!   every collection, rewritten on each change. Cart and order history can
//!   never disagree after a crash.

use core::fmt;

use fitkart_core::{Cart, CartItem, Order, Product, User};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::storage::KeyValueStore;

/// Record key for the catalog.
pub const PRODUCTS_KEY: &str = "fitkart_products";
/// Record key for the cart.
pub const CART_KEY: &str = "fitkart_cart";
/// Record key for the session user.
pub const USER_KEY: &str = "fitkart_user";
/// Record key for the order history.
pub const ORDERS_KEY: &str = "fitkart_orders";
/// Record key for the snapshot layout.
pub const SNAPSHOT_KEY: &str = "fitkart_state";

/// How state is split into records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageLayout {
    #[default]
    Split,
    Snapshot,
}

impl fmt::Display for StorageLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Split => write!(f, "split"),
            Self::Snapshot => write!(f, "snapshot"),
        }
    }
}

impl std::str::FromStr for StorageLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "split" => Ok(Self::Split),
            "snapshot" => Ok(Self::Snapshot),
            _ => Err(format!("invalid storage layout: {s} (expected split or snapshot)")),
        }
    }
}

/// Which collection a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    Products,
    Cart,
    User,
    Orders,
}

impl Record {
    /// Record key under the split layout.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Products => PRODUCTS_KEY,
            Self::Cart => CART_KEY,
            Self::User => USER_KEY,
            Self::Orders => ORDERS_KEY,
        }
    }
}

/// Every collection the store holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    pub products: Vec<Product>,
    pub cart: Cart,
    #[serde(default)]
    pub user: Option<User>,
    /// Newest first.
    pub orders: Vec<Order>,
}

/// State as read back from storage.
///
/// `products` is `None` when no catalog has been persisted yet, so the
/// caller can fall back to the seed.
#[derive(Debug, Default)]
pub struct LoadedState {
    pub products: Option<Vec<Product>>,
    pub cart: Cart,
    pub user: Option<User>,
    pub orders: Vec<Order>,
}

/// Reads and writes [`StoreState`] through a [`KeyValueStore`].
#[derive(Debug)]
pub struct Persistence<S> {
    storage: S,
    layout: StorageLayout,
}

impl<S: KeyValueStore> Persistence<S> {
    #[must_use]
    pub const fn new(storage: S, layout: StorageLayout) -> Self {
        Self { storage, layout }
    }

    #[must_use]
    pub const fn layout(&self) -> StorageLayout {
        self.layout
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Read every record.
    ///
    /// Missing records load as empty collections.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if a record cannot be read and
    /// `StoreError::Corrupt` if a record does not parse.
    pub fn load(&self) -> Result<LoadedState, StoreError> {
        match self.layout {
            StorageLayout::Split => {
                let products = self.read::<Vec<Product>>(PRODUCTS_KEY)?;
                let cart = self
                    .read::<Vec<CartItem>>(CART_KEY)?
                    .map(Cart::from)
                    .unwrap_or_default();
                // The user record holds `null` after a logout in older data.
                let user = self.read::<Option<User>>(USER_KEY)?.flatten();
                let orders = self.read::<Vec<Order>>(ORDERS_KEY)?.unwrap_or_default();
                Ok(LoadedState {
                    products,
                    cart,
                    user,
                    orders,
                })
            }
            StorageLayout::Snapshot => Ok(self
                .read::<StoreState>(SNAPSHOT_KEY)?
                .map(|state| LoadedState {
                    products: Some(state.products),
                    cart: state.cart,
                    user: state.user,
                    orders: state.orders,
                })
                .unwrap_or_default()),
        }
    }

    /// Write the record that holds `record` (or the whole snapshot).
    ///
    /// Under the split layout a logged-out user removes the user record
    /// instead of writing `null`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the backend write fails.
    pub fn save(&mut self, state: &StoreState, record: Record) -> Result<(), StoreError> {
        match self.layout {
            StorageLayout::Split => match record {
                Record::Products => self.write(PRODUCTS_KEY, &state.products),
                Record::Cart => self.write(CART_KEY, &state.cart),
                Record::Orders => self.write(ORDERS_KEY, &state.orders),
                Record::User => match &state.user {
                    Some(user) => self.write(USER_KEY, user),
                    None => Ok(self.storage.remove(USER_KEY)?),
                },
            },
            StorageLayout::Snapshot => self.write(SNAPSHOT_KEY, state),
        }
    }

    /// Write every record.
    ///
    /// # Errors
    ///
    /// Returns the first `StoreError` encountered.
    pub fn save_all(&mut self, state: &StoreState) -> Result<(), StoreError> {
        match self.layout {
            StorageLayout::Split => {
                for record in [Record::Products, Record::Cart, Record::User, Record::Orders] {
                    self.save(state, record)?;
                }
                Ok(())
            }
            StorageLayout::Snapshot => self.write(SNAPSHOT_KEY, state),
        }
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.storage.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Corrupt {
                key: key.to_owned(),
                source,
            })
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_owned(),
            source,
        })?;
        self.storage.set(key, &json)?;
        Ok(())
    }
}
