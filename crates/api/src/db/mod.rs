//! Database operations for the catalog SQLite database.
//!
//! ## Tables
//!
//! - `products` - The catalog served by `GET /products`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p blogbox-cli -- db migrate
//! ```

pub mod products;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use products::{NewProduct, ProductRepository, demo_catalog, seed_demo_catalog};

/// Errors raised by repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored value could not be turned back into a domain type.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a SQLite connection pool, creating the database file if needed.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the database cannot be opened.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create a single-connection in-memory database with migrations applied.
///
/// Every call yields an independent, empty catalog.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database cannot be opened or migrated.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Apply all pending catalog migrations.
///
/// # Errors
///
/// Returns `sqlx::Error` if a migration fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
