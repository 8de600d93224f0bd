//! Catalog database commands.
//!
//! # Environment Variables
//!
//! - `BLOGBOX_DATABASE_URL` - SQLite connection string (default: `sqlite:blogbox.db`)

use tracing::info;

use blogbox_api::config::ApiConfig;
use blogbox_api::db;

/// Run all pending catalog migrations.
pub async fn migrate() -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::from_env()?;

    info!(database_url = %config.database_url, "Connecting to catalog database...");
    let pool = db::create_pool(&config.database_url).await?;

    info!("Running catalog migrations...");
    db::run_migrations(&pool).await?;

    info!("Catalog migrations complete!");
    crate::render::message("Catalog migrations complete.");
    Ok(())
}

/// Insert the demo catalog into an empty database.
pub async fn seed() -> Result<(), Box<dyn std::error::Error>> {
    let config = ApiConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    let inserted = db::seed_demo_catalog(&pool).await?;
    if inserted == 0 {
        crate::render::message("Catalog already has products; nothing seeded.");
    } else {
        crate::render::message(&format!("Seeded {inserted} demo products."));
    }
    Ok(())
}
