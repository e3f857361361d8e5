//! Integration tests for FitKart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fitkart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `file_store` - Shopping flows against the file-backed store
//! - `layouts` - Split and snapshot record layouts on disk
//! - `seeding` - Catalog seeding from configuration
//!
//! Every test works in its own temporary data directory; nothing outside it
//! is touched.
