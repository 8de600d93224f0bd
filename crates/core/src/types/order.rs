//! Order drafts built from a cart.
//!
//! An [`Order`] captures what the shopper is buying at the moment of checkout:
//! item prices are frozen as `price_at_purchase` so later catalog changes do
//! not alter the order. Submitting and paying for orders is out of scope;
//! drafts stay [`OrderStatus::Pending`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::email::Email;
use super::id::{OrderId, ProductId};
use super::status::OrderStatus;
use crate::cart::Cart;

/// Smallest amount an order total or item price may have.
pub const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Longest product name an order item may carry.
pub const MAX_PRODUCT_NAME_LENGTH: usize = 100;

/// Reasons a cart cannot become an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("cannot create an order from an empty cart")]
    EmptyCart,

    #[error("order total {0} is below the minimum of 0.01")]
    TotalTooLow(Decimal),

    #[error("product {0} has a price below the minimum of 0.01")]
    PriceTooLow(ProductId),

    #[error("product {0} has an empty name")]
    MissingProductName(ProductId),

    #[error("product {product_id} name exceeds {max} characters")]
    ProductNameTooLong { product_id: ProductId, max: usize },
}

/// A single purchased product within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price_at_purchase: Decimal,
}

impl OrderItem {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price_at_purchase * Decimal::from(self.quantity)
    }
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Assigned once the order is stored; drafts have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    pub customer_email: Email,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Build a pending order draft from the contents of `cart`.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError`] if the cart is empty, if any item is priced
    /// below 0.01 or has an unusable name, or if the total is below 0.01.
    pub fn from_cart(
        cart: &Cart,
        customer_email: Email,
        created_at: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let items = cart
            .items()
            .iter()
            .map(|line| {
                let product = &line.product;
                let name = product.name.trim();
                if name.is_empty() {
                    return Err(OrderError::MissingProductName(product.id));
                }
                if name.chars().count() > MAX_PRODUCT_NAME_LENGTH {
                    return Err(OrderError::ProductNameTooLong {
                        product_id: product.id,
                        max: MAX_PRODUCT_NAME_LENGTH,
                    });
                }
                let price = line.unit_price();
                if price < MIN_AMOUNT {
                    return Err(OrderError::PriceTooLow(product.id));
                }
                Ok(OrderItem {
                    product_id: product.id,
                    product_name: name.to_owned(),
                    quantity: line.quantity,
                    price_at_purchase: price,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total_amount: Decimal = items.iter().map(OrderItem::line_total).sum();
        if total_amount < MIN_AMOUNT {
            return Err(OrderError::TotalTooLow(total_amount));
        }

        Ok(Self {
            id: None,
            customer_email,
            total_amount,
            status: OrderStatus::Pending,
            created_at,
            completed_at: None,
            items,
        })
    }
}
