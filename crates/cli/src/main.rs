//! Blogbox CLI - command-line storefront and database tools.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! blogbox products list
//! blogbox products show 2
//!
//! # Manage the cart (saved to .blogbox/storage.json)
//! blogbox cart add 2 --quantity 3
//! blogbox cart update 2 1
//! blogbox cart remove 2
//! blogbox cart show
//! blogbox cart clear
//! blogbox cart order --email shopper@example.com
//!
//! # Prepare the catalog database
//! blogbox db migrate
//! blogbox db seed
//! ```
//!
//! # Environment Variables
//!
//! - `BLOGBOX_API_URL` - Catalog API base URL (default: `http://localhost:5064`)
//! - `BLOGBOX_STORAGE` - Local storage file (default: `.blogbox/storage.json`)
//! - `BLOGBOX_DATABASE_URL` - SQLite database for `db` commands
//! - `RUST_LOG` - Log filter (default: `warn`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use blogbox_client::DEFAULT_API_BASE_URL;
use blogbox_core::ProductId;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "blogbox")]
#[command(author, version, about = "Blogbox Store command-line storefront")]
struct Cli {
    /// Catalog API base URL
    #[arg(long, global = true, env = "BLOGBOX_API_URL", default_value = DEFAULT_API_BASE_URL)]
    api_url: String,

    /// Local storage file holding the cart
    #[arg(
        long,
        global = true,
        env = "BLOGBOX_STORAGE",
        default_value = ".blogbox/storage.json"
    )]
    storage: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the catalog database
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List every product
    List,
    /// Show one product
    Show {
        /// Product id
        id: ProductId,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents and total
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        id: ProductId,

        /// Number of units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a product already in the cart
    Update {
        /// Product id
        id: ProductId,

        /// New quantity (values below 1 are ignored)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Empty the cart
    Clear,
    /// Print an order draft for the cart (no payment is taken)
    Order {
        /// Customer email address
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Run catalog database migrations
    Migrate,
    /// Insert demo products into an empty catalog
    Seed,
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // Load .env file if present so clap's env fallbacks see it
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Products { action } => {
            let catalog = commands::catalog(&cli.api_url)?;
            match action {
                ProductsAction::List => commands::products::list(&catalog).await?,
                ProductsAction::Show { id } => commands::products::show(&catalog, id).await?,
            }
        }
        Commands::Cart { action } => {
            let mut session = commands::cart::open(&cli.storage);
            match action {
                CartAction::Show => commands::cart::show(&session),
                CartAction::Add { id, quantity } => {
                    let catalog = commands::catalog(&cli.api_url)?;
                    commands::cart::add(&mut session, &catalog, id, quantity).await?;
                }
                CartAction::Update { id, quantity } => {
                    commands::cart::update(&mut session, id, quantity);
                }
                CartAction::Remove { id } => commands::cart::remove(&mut session, id),
                CartAction::Clear => commands::cart::clear(&mut session),
                CartAction::Order { email } => commands::cart::order(&session, &email)?,
            }
        }
        Commands::Db { action } => match action {
            DbAction::Migrate => commands::db::migrate().await?,
            DbAction::Seed => commands::db::seed().await?,
        },
    }
    Ok(())
}
