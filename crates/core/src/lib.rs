//! FitKart Core - Shared domain types.
//!
//! This crate provides the types and pure state logic used by the FitKart
//! components:
//! - `storefront` - The store state holder and its persistence
//! - `cli` - Command-line front end over the store
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no clocks,
//! no storage. Anything time-dependent takes the timestamp as an argument.
//!
//! # Modules
//!
//! - [`types`] - Ids, money, email, catalog, cart, bill, user and order types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
