//! Catalog product.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product as served by the catalog API.
///
/// Products are owned by the catalog; the cart keeps a copy of whatever the
/// catalog returned when the item was added.
///
/// Prices are written as JSON numbers. Either numbers or decimal strings are
/// accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    #[serde(default)]
    pub is_on_sale: bool,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub sale_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Create a product with no sale and no optional details.
    #[must_use]
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            price,
            is_on_sale: false,
            sale_price: None,
            image_url: None,
        }
    }

    /// Put the product on sale at `sale_price`.
    #[must_use]
    pub fn on_sale(mut self, sale_price: Decimal) -> Self {
        self.is_on_sale = true;
        self.sale_price = Some(sale_price);
        self
    }

    /// The price a shopper pays for one unit.
    ///
    /// A product flagged as on sale without a sale price falls back to its
    /// regular price.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        match (self.is_on_sale, self.sale_price) {
            (true, Some(sale_price)) => sale_price,
            _ => self.price,
        }
    }

    /// Effective price formatted for display.
    #[must_use]
    pub fn display_price(&self) -> Price {
        Price::usd(self.effective_price())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_price() {
        let product = Product::new(ProductId::new(1), "Mug", Decimal::new(10, 0));
        assert_eq!(product.effective_price(), Decimal::new(10, 0));

        let product = product.on_sale(Decimal::new(750, 2));
        assert_eq!(product.effective_price(), Decimal::new(750, 2));
    }

    #[test]
    fn test_sale_flag_without_sale_price_uses_regular_price() {
        let mut product = Product::new(ProductId::new(1), "Mug", Decimal::new(10, 0));
        product.is_on_sale = true;
        assert_eq!(product.effective_price(), Decimal::new(10, 0));
    }

    #[test]
    fn test_deserializes_camel_case_with_numeric_prices() {
        let json = r#"{"id":3,"name":"Poster","price":12.5,"isOnSale":true,"salePrice":9.99}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert!(product.is_on_sale);
        assert_eq!(product.effective_price(), Decimal::new(999, 2));
        assert_eq!(product.description, None);
    }

    #[test]
    fn test_serializes_camel_case() {
        let product = Product::new(ProductId::new(1), "Mug", Decimal::new(10, 0));
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["isOnSale"], serde_json::Value::Bool(false));
        assert!(value.get("salePrice").is_none());
    }

    #[test]
    fn test_prices_serialize_as_json_numbers() {
        let product =
            Product::new(ProductId::new(1), "Mug", Decimal::new(1299, 2)).on_sale(Decimal::new(999, 2));
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["price"], serde_json::json!(12.99));
        assert_eq!(value["salePrice"], serde_json::json!(9.99));

        let restored: Product = serde_json::from_value(value).unwrap();
        assert_eq!(restored, product);
    }

    #[test]
    fn test_string_prices_from_older_snapshots_still_parse() {
        let json = r#"{"id":1,"name":"Mug","price":"10.50","isOnSale":true,"salePrice":"8"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Decimal::new(1050, 2));
        assert_eq!(product.sale_price, Some(Decimal::from(8)));
    }
}
