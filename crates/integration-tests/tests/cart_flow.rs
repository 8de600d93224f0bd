//! Shopping flow: browse the catalog, fill a cart, and reload it from disk.

#![allow(clippy::unwrap_used)]

use blogbox_api::db::NewProduct;
use blogbox_client::{CART_STORAGE_KEY, CartSession, FileStore, Hydration};
use blogbox_core::{Cart, KeyValueStore};
use blogbox_integration_tests::{TestServer, temp_storage_path};
use rust_decimal::Decimal;

#[tokio::test]
async fn test_cart_built_from_catalog_persists_across_sessions() {
    let server = TestServer::start().await;
    let notebook = server
        .insert(NewProduct::new("Notebook", Decimal::from(10)))
        .await;
    let stickers = server
        .insert(NewProduct::new("Stickers", Decimal::from(5)).sale_price(Decimal::new(350, 2)))
        .await;
    let catalog = server.catalog();
    let path = temp_storage_path();

    {
        let mut session = CartSession::open(FileStore::new(&path));
        let product = catalog.get_product_by_id(notebook.id).await.unwrap();
        session.add_to_cart(&product, 2);
        session.add_to_cart(&product, 3);
        let product = catalog.get_product_by_id(stickers.id).await.unwrap();
        session.add_to_cart(&product, 2);

        assert_eq!(session.cart().len(), 2);
        assert_eq!(session.cart_total(), Decimal::from(57));
    }

    let mut session = CartSession::new(FileStore::new(&path));
    assert_eq!(session.hydrate(), Hydration::Restored { items: 2 });
    assert_eq!(session.cart_item_count(), 7);
    assert_eq!(session.cart_total(), Decimal::from(57));

    session.update_quantity(notebook.id, 1);
    session.remove_from_cart(stickers.id);
    session.remove_from_cart(stickers.id);
    assert_eq!(session.cart_total(), Decimal::from(10));

    let raw = FileStore::new(&path).get(CART_STORAGE_KEY).unwrap().unwrap();
    let saved: Cart = serde_json::from_str(&raw).unwrap();
    assert_eq!(&saved, session.cart());

    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}

#[tokio::test]
async fn test_append_only_snapshot_is_merged_on_load() {
    let path = temp_storage_path();
    let mut storage = FileStore::new(&path);
    storage
        .set(
            CART_STORAGE_KEY,
            r#"[
                {"product":{"id":1,"name":"Mug","price":10,"isOnSale":false},"quantity":2},
                {"product":{"id":1,"name":"Mug","price":10,"isOnSale":false},"quantity":1}
            ]"#,
        )
        .unwrap();

    let mut session = CartSession::open(FileStore::new(&path));
    assert_eq!(session.cart().len(), 1);
    assert_eq!(session.cart_total(), Decimal::from(30));

    session.clear_cart();
    let raw = FileStore::new(&path).get(CART_STORAGE_KEY).unwrap().unwrap();
    assert_eq!(raw, "[]");

    std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
}
