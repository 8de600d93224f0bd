//! Catalog client against a running catalog server.

#![allow(clippy::unwrap_used)]

use blogbox_api::db::NewProduct;
use blogbox_client::{CatalogClient, CatalogError};
use blogbox_core::ProductId;
use blogbox_integration_tests::TestServer;
use rust_decimal::Decimal;

#[tokio::test]
async fn test_get_products_returns_catalog_in_id_order() {
    let server = TestServer::start().await;
    server
        .insert(NewProduct::new("Notebook", Decimal::new(1299, 2)))
        .await;
    server
        .insert(NewProduct::new("Pen", Decimal::new(3450, 2)).sale_price(Decimal::from(29)))
        .await;

    let products = server.catalog().get_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Notebook");
    assert_eq!(products[0].price, Decimal::new(1299, 2));
    assert!(products[1].is_on_sale);
    assert_eq!(products[1].effective_price(), Decimal::from(29));
}

#[tokio::test]
async fn test_get_products_on_empty_catalog() {
    let server = TestServer::start().await;
    assert!(server.catalog().get_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_product_by_id() {
    let server = TestServer::start().await;
    let created = server
        .insert(NewProduct::new("Lamp", Decimal::new(4999, 2)).description("Warm white LED."))
        .await;

    let product = server.catalog().get_product_by_id(created.id).await.unwrap();

    assert_eq!(product, created);
    assert_eq!(product.description.as_deref(), Some("Warm white LED."));
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let server = TestServer::start().await;

    let err = server
        .catalog()
        .get_product_by_id(ProductId::new(404))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::NotFound(id) if id == ProductId::new(404)));
}

#[tokio::test]
async fn test_base_url_with_trailing_slash() {
    let server = TestServer::start().await;
    server.insert(NewProduct::new("Mug", Decimal::from(10))).await;

    let client = CatalogClient::new(&format!("{}/", server.base_url())).unwrap();
    assert_eq!(client.get_products().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_wrong_prefix_is_status_error() {
    let server = TestServer::start().await;

    let client = CatalogClient::new(&format!("{}/v2", server.base_url())).unwrap();
    let err = client.get_products().await.unwrap_err();

    assert!(matches!(
        err,
        CatalogError::Status { status, .. } if status == reqwest::StatusCode::NOT_FOUND
    ));
}
