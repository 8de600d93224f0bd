//! Core types for Blogbox Store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use order::{Order, OrderError, OrderItem};
pub use price::{CurrencyCode, Price};
pub use product::Product;
pub use status::*;
