//! Store error types.
//!
//! Store mutations never fail; these errors come from loading state,
//! explicit flushes and catalog seeding.

use thiserror::Error;

use crate::catalog::SeedError;
use crate::storage::StorageError;

/// Errors raised while loading or persisting store state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A persisted record could not be parsed.
    #[error("Corrupt record '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// State could not be serialized.
    #[error("Failed to encode record '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The catalog seed could not be loaded.
    #[error("Catalog seed error: {0}")]
    Seed(#[from] SeedError),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
