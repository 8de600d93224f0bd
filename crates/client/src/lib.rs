//! Blogbox client library.
//!
//! Everything a storefront front end needs besides rendering:
//!
//! - [`catalog`] - HTTP client for the catalog API
//! - [`storage`] - [`KeyValueStore`](blogbox_core::KeyValueStore) adapters
//! - [`session`] - A cart that hydrates from and syncs to storage

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod session;
pub mod storage;

pub use catalog::{CatalogClient, CatalogError, DEFAULT_API_BASE_URL};
pub use session::{CART_STORAGE_KEY, CartSession, Hydration};
pub use storage::{FileStore, MemoryStore};
