//! Integration test harness for Blogbox Store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p blogbox-integration-tests
//! ```
//!
//! Each test starts its own catalog server on an ephemeral port, backed by a
//! fresh in-memory SQLite database, and talks to it over real HTTP.

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::net::SocketAddr;
use std::path::PathBuf;

use blogbox_api::config::ApiConfig;
use blogbox_api::db::{NewProduct, ProductRepository, create_memory_pool};
use blogbox_api::state::AppState;
use blogbox_client::CatalogClient;
use blogbox_core::Product;

/// A catalog server running in the background of the current test.
pub struct TestServer {
    pub addr: SocketAddr,
    pub state: AppState,
}

impl TestServer {
    /// Start a server with an empty catalog.
    pub async fn start() -> Self {
        let config = ApiConfig::from_lookup(|_| None).unwrap();
        let pool = create_memory_pool().await.unwrap();
        let state = AppState::new(config, pool);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = blogbox_api::app(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self { addr, state }
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    #[must_use]
    pub fn catalog(&self) -> CatalogClient {
        CatalogClient::new(&self.base_url()).unwrap()
    }

    /// Insert a product directly into the server's database.
    pub async fn insert(&self, product: NewProduct) -> Product {
        ProductRepository::new(self.state.pool())
            .create(&product)
            .await
            .unwrap()
    }
}

/// A storage file path in a fresh temporary directory.
#[must_use]
pub fn temp_storage_path() -> PathBuf {
    std::env::temp_dir()
        .join(format!("blogbox-it-{}", uuid::Uuid::new_v4()))
        .join("storage.json")
}
