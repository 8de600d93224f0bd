//! Blogbox Core - Shared types and cart state.
//!
//! This crate provides the types used across all Blogbox components:
//! - `api` - Catalog HTTP API over SQLite
//! - `client` - Catalog client and cart persistence
//! - `cli` - Command-line storefront and database tools
//!
//! # Architecture
//!
//! The core crate contains only types, pure state transitions, and traits -
//! no I/O, no database access, no HTTP clients. Anything that touches the
//! outside world does so through a trait defined here (see [`storage`]).
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, products, emails, orders
//! - [`cart`] - Cart line items, the cart reducer, and [`CartStore`]
//! - [`storage`] - The key-value storage port used to persist carts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod storage;
pub mod types;

pub use cart::{Cart, CartAction, CartStore, LineItem};
pub use storage::{KeyValueStore, StorageError};
pub use types::*;
