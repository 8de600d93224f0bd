//! Product repository.
//!
//! Prices live in TEXT columns as decimal strings and are parsed on the way
//! out; a value that no longer parses is reported as data corruption rather
//! than silently skipped.

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::SqlitePool;

use blogbox_core::{Product, ProductId};

use super::RepositoryError;

/// Row shape of the `products` table.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    price: String,
    is_on_sale: bool,
    sale_price: Option<String>,
    image_url: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let id = i32::try_from(row.id).map_err(|_| {
            RepositoryError::DataCorruption(format!("product id {} out of range", row.id))
        })?;
        let price = parse_decimal(&row.price, row.id, "price")?;
        let sale_price = row
            .sale_price
            .as_deref()
            .map(|value| parse_decimal(value, row.id, "sale_price"))
            .transpose()?;

        Ok(Self {
            id: ProductId::new(id),
            name: row.name,
            description: row.description,
            price,
            is_on_sale: row.is_on_sale,
            sale_price,
            image_url: row.image_url,
        })
    }
}

fn parse_decimal(value: &str, id: i64, column: &str) -> Result<Decimal, RepositoryError> {
    Decimal::from_str(value.trim()).map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid {column} {value:?} for product {id}: {e}"))
    })
}

/// A product to be inserted; the database assigns the id.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub sale_price: Option<Decimal>,
    pub image_url: Option<String>,
}

impl NewProduct {
    #[must_use]
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            sale_price: None,
            image_url: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Mark the product on sale at `sale_price`.
    #[must_use]
    pub const fn sale_price(mut self, sale_price: Decimal) -> Self {
        self.sale_price = Some(sale_price);
        self
    }
}

/// Repository for catalog product queries.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every product ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, is_on_sale, sale_price, image_url
            FROM products
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Get a product by its id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, is_on_sale, sale_price, image_url
            FROM products
            WHERE id = ?
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Insert a product and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO products (name, description, price, is_on_sale, sale_price, image_url)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, name, description, price, is_on_sale, sale_price, image_url
            ",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.to_string())
        .bind(product.sale_price.is_some())
        .bind(product.sale_price.map(|price| price.to_string()))
        .bind(&product.image_url)
        .fetch_one(self.pool)
        .await?;

        Product::try_from(row)
    }

    /// Count products in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

/// Products inserted by `blogbox db seed`.
#[must_use]
pub fn demo_catalog() -> Vec<NewProduct> {
    vec![
        NewProduct::new("Blogbox Notebook", Decimal::new(1299, 2))
            .description("A5 dotted notebook, 120 pages."),
        NewProduct::new("Fountain Pen", Decimal::new(3450, 2))
            .description("Steel nib, refillable converter included.")
            .sale_price(Decimal::new(2900, 2)),
        NewProduct::new("Desk Lamp", Decimal::new(4999, 2)).description("Warm white LED."),
        NewProduct::new("Sticker Pack", Decimal::new(500, 2))
            .description("Ten vinyl stickers.")
            .sale_price(Decimal::new(350, 2)),
    ]
}

/// Insert [`demo_catalog`] if the catalog is empty.
///
/// Returns the number of products inserted.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if a query fails.
pub async fn seed_demo_catalog(pool: &SqlitePool) -> Result<usize, RepositoryError> {
    let repo = ProductRepository::new(pool);
    if repo.count().await? > 0 {
        tracing::info!("Catalog already has products, skipping seed");
        return Ok(0);
    }

    let catalog = demo_catalog();
    for product in &catalog {
        repo.create(product).await?;
    }
    tracing::info!(count = catalog.len(), "Seeded demo catalog");
    Ok(catalog.len())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;

    #[tokio::test]
    async fn test_create_and_get() {
        let pool = create_memory_pool().await.unwrap();
        let repo = ProductRepository::new(&pool);

        let created = repo
            .create(&NewProduct::new("Mug", Decimal::new(1050, 2)).sale_price(Decimal::from(9)))
            .await
            .unwrap();
        assert!(created.is_on_sale);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.price, Decimal::new(1050, 2));
        assert_eq!(fetched.effective_price(), Decimal::from(9));
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let pool = create_memory_pool().await.unwrap();
        let repo = ProductRepository::new(&pool);
        assert!(repo.get_by_id(ProductId::new(42)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_orders_by_id() {
        let pool = create_memory_pool().await.unwrap();
        let repo = ProductRepository::new(&pool);
        repo.create(&NewProduct::new("First", Decimal::ONE)).await.unwrap();
        repo.create(&NewProduct::new("Second", Decimal::TWO)).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn test_invalid_stored_price_is_corruption() {
        let pool = create_memory_pool().await.unwrap();
        sqlx::query("INSERT INTO products (name, price) VALUES ('Broken', 'twelve')")
            .execute(&pool)
            .await
            .unwrap();

        let err = ProductRepository::new(&pool).list().await.unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }

    #[tokio::test]
    async fn test_seed_only_fills_empty_catalog() {
        let pool = create_memory_pool().await.unwrap();
        assert_eq!(seed_demo_catalog(&pool).await.unwrap(), demo_catalog().len());
        assert_eq!(seed_demo_catalog(&pool).await.unwrap(), 0);
        assert_eq!(
            ProductRepository::new(&pool).count().await.unwrap(),
            i64::try_from(demo_catalog().len()).unwrap()
        );
    }
}
