//! Command implementations.

pub mod cart;
pub mod db;
pub mod products;

use blogbox_client::{CatalogClient, CatalogError};

/// Build a catalog client for `api_url`.
pub fn catalog(api_url: &str) -> Result<CatalogClient, CatalogError> {
    tracing::debug!(api_url, "Using catalog API");
    CatalogClient::new(api_url)
}
