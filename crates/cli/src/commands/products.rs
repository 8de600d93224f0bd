//! Catalog browsing commands.

use blogbox_client::{CatalogClient, CatalogError};
use blogbox_core::ProductId;

use crate::render;

/// Print every product in the catalog.
pub async fn list(catalog: &CatalogClient) -> Result<(), CatalogError> {
    let products = catalog.get_products().await?;
    render::product_list(&products);
    Ok(())
}

/// Print one product.
pub async fn show(catalog: &CatalogClient, id: ProductId) -> Result<(), CatalogError> {
    let product = catalog.get_product_by_id(id).await?;
    render::product_detail(&product);
    Ok(())
}
