//! Core types for FitKart.
//!
//! This module provides type-safe wrappers and records for the store domain.

pub mod bill;
pub mod cart;
pub mod email;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;
pub mod user;

pub use bill::Bill;
pub use cart::{Cart, CartItem};
pub use email::{Email, EmailError};
pub use id::*;
pub use order::Order;
pub use price::{Currency, Price};
pub use product::Product;
pub use status::*;
pub use user::User;
