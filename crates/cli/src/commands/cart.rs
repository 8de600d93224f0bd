//! Cart commands.
//!
//! Each invocation opens the cart saved in local storage, applies one action,
//! and lets the session write the result back. Storage problems are logged
//! by the session and never fail a command.

use std::path::Path;

use chrono::Utc;
use thiserror::Error;

use blogbox_client::{CartSession, CatalogClient, CatalogError, FileStore};
use blogbox_core::{Email, EmailError, Order, OrderError, ProductId};

use crate::render;

/// Errors from `cart order`.
#[derive(Debug, Error)]
pub enum OrderCommandError {
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),
    #[error("cannot build order: {0}")]
    Order(#[from] OrderError),
    #[error("cannot encode order: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Open and hydrate the cart stored at `path`.
pub fn open(path: &Path) -> CartSession<FileStore> {
    let mut session = CartSession::new(FileStore::new(path));
    let outcome = session.hydrate();
    tracing::debug!(?outcome, path = %path.display(), "Opened cart");
    session
}

pub fn show(session: &CartSession<FileStore>) {
    render::cart(session.cart());
}

/// Fetch `id` from the catalog and add `quantity` units of it.
pub async fn add(
    session: &mut CartSession<FileStore>,
    catalog: &CatalogClient,
    id: ProductId,
    quantity: u32,
) -> Result<(), CatalogError> {
    let product = catalog.get_product_by_id(id).await?;
    if session.add_to_cart(&product, quantity) {
        render::message(&format!("Added {quantity} x {} to the cart.", product.name));
    }
    render::cart(session.cart());
    Ok(())
}

/// Set the quantity of `id`. Quantities below 1 leave the cart unchanged.
pub fn update(session: &mut CartSession<FileStore>, id: ProductId, quantity: i64) {
    match requested_quantity(quantity) {
        Some(quantity) => {
            session.update_quantity(id, quantity);
        }
        None => tracing::debug!(quantity, "Ignoring quantity below 1"),
    }
    render::cart(session.cart());
}

pub fn remove(session: &mut CartSession<FileStore>, id: ProductId) {
    session.remove_from_cart(id);
    render::cart(session.cart());
}

pub fn clear(session: &mut CartSession<FileStore>) {
    session.clear_cart();
    render::cart(session.cart());
}

/// Print an order draft for the current cart.
pub fn order(session: &CartSession<FileStore>, email: &str) -> Result<(), OrderCommandError> {
    let draft = build_order(session, email)?;
    render::message(&serde_json::to_string_pretty(&draft)?);
    Ok(())
}

fn build_order(
    session: &CartSession<FileStore>,
    email: &str,
) -> Result<Order, OrderCommandError> {
    let email = Email::parse(email)?;
    Ok(Order::from_cart(session.cart(), email, Utc::now())?)
}

/// Convert user input into a store quantity; anything below 1 is rejected.
fn requested_quantity(quantity: i64) -> Option<u32> {
    u32::try_from(quantity).ok().filter(|&q| q >= 1)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use blogbox_core::Product;
    use rust_decimal::Decimal;

    use super::*;

    fn temp_storage() -> PathBuf {
        std::env::temp_dir()
            .join(format!("blogbox-cli-{}", uuid::Uuid::new_v4()))
            .join("storage.json")
    }

    #[test]
    fn test_requested_quantity() {
        assert_eq!(requested_quantity(3), Some(3));
        assert_eq!(requested_quantity(0), None);
        assert_eq!(requested_quantity(-2), None);
        assert_eq!(requested_quantity(i64::MAX), None);
    }

    #[test]
    fn test_cart_survives_between_invocations() {
        let path = temp_storage();
        let mug = Product::new(ProductId::new(1), "Mug", Decimal::from(10));

        let mut first = open(&path);
        first.add_to_cart(&mug, 2);

        let mut second = open(&path);
        assert_eq!(second.cart_item_count(), 2);
        update(&mut second, mug.id, -1);
        assert_eq!(second.cart_item_count(), 2);
        update(&mut second, mug.id, 4);

        let third = open(&path);
        assert_eq!(third.cart_total(), Decimal::from(40));

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_build_order_validates_email_and_cart() {
        let path = temp_storage();
        let mut session = open(&path);

        assert!(matches!(
            build_order(&session, "nope"),
            Err(OrderCommandError::Email(_))
        ));
        assert!(matches!(
            build_order(&session, "shopper@example.com"),
            Err(OrderCommandError::Order(OrderError::EmptyCart))
        ));

        session.add_to_cart(&Product::new(ProductId::new(1), "Mug", Decimal::from(10)), 1);
        let order = build_order(&session, "shopper@example.com").unwrap();
        assert_eq!(order.total_amount, Decimal::from(10));

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
