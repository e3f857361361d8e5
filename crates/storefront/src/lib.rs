//! FitKart Storefront library.
//!
//! Holds the store state (catalog, cart, session user, order history) and
//! mirrors it to durable key-value storage after every mutation.
//!
//! # Modules
//!
//! - [`store`] - The [`Store`] state holder and its operations
//! - [`catalog`] - Browsing queries, admin drafts and catalog seeding
//! - [`persist`] - Record layouts over a key-value store
//! - [`storage`] - Storage backends (files, memory)
//! - [`config`] - Environment configuration
//! - [`error`] - Error types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod persist;
pub mod storage;
pub mod store;

pub use config::StorefrontConfig;
pub use error::StoreError;
pub use persist::{StorageLayout, StoreState};
pub use store::Store;
