//! Catalog API client.
//!
//! Thin read-only wrapper over the two catalog endpoints:
//!
//! ```text
//! GET {base}/products        -> [Product]
//! GET {base}/products/{id}   -> Product
//! ```
//!
//! No retries, no caching, no timeouts. Failures are logged here and handed
//! back to the caller, which decides what the shopper sees.

use std::sync::Arc;

use blogbox_core::{Product, ProductId};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error, instrument};
use url::Url;

/// Catalog API location used when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5064";

/// Errors returned by [`CatalogClient`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The base URL or a derived endpoint could not be parsed.
    #[error("invalid catalog URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request could not be sent or its body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested product does not exist.
    #[error("product {0} not found")]
    NotFound(ProductId),

    /// The API answered with a non-success status.
    #[error("failed to fetch {resource}: HTTP {status}")]
    Status {
        resource: &'static str,
        status: StatusCode,
    },

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the catalog HTTP API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

#[derive(Debug)]
struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidUrl`] if `base_url` is not a valid URL.
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    /// Create a client that sends requests through `client`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidUrl`] if `base_url` is not a valid URL.
    pub fn with_http_client(base_url: &str, client: reqwest::Client) -> Result<Self, CatalogError> {
        let mut base_url = Url::parse(base_url)?;
        // Endpoints are joined relative to the base, which needs a trailing slash
        // to keep any path prefix.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            inner: Arc::new(CatalogClientInner { client, base_url }),
        })
    }

    /// Create a client for [`DEFAULT_API_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Never fails in practice; the default URL is valid.
    pub fn localhost() -> Result<Self, CatalogError> {
        Self::new(DEFAULT_API_BASE_URL)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Fetch every product in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the API answers with a
    /// non-success status, or the body is not a product list.
    #[instrument(skip(self), fields(base_url = %self.inner.base_url))]
    pub async fn get_products(&self) -> Result<Vec<Product>, CatalogError> {
        let products: Vec<Product> = self.fetch("products", "products").await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Fetch one product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id, or another
    /// [`CatalogError`] if the request fails.
    #[instrument(skip(self), fields(base_url = %self.inner.base_url))]
    pub async fn get_product_by_id(&self, id: ProductId) -> Result<Product, CatalogError> {
        match self.fetch(&format!("products/{id}"), "product").await {
            Err(CatalogError::Status {
                status: StatusCode::NOT_FOUND,
                ..
            }) => Err(CatalogError::NotFound(id)),
            other => other,
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &'static str,
    ) -> Result<T, CatalogError> {
        let url = self.inner.base_url.join(path)?;

        let response = self
            .inner
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .inspect_err(|e| error!(error = %e, url = %url, "Failed to fetch {resource}"))?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, url = %url, "Failed to fetch {resource}");
            return Err(CatalogError::Status { resource, status });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let client = CatalogClient::new("http://localhost:5064/api").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:5064/api/");
        assert_eq!(
            client.base_url().join("products/3").unwrap().as_str(),
            "http://localhost:5064/api/products/3"
        );
    }

    #[test]
    fn test_default_base_url() {
        let client = CatalogClient::localhost().unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:5064/");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            CatalogClient::new("not a url"),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = CatalogError::NotFound(ProductId::new(9));
        assert_eq!(err.to_string(), "product 9 not found");

        let err = CatalogError::Status {
            resource: "products",
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(
            err.to_string(),
            "failed to fetch products: HTTP 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let client = CatalogClient::new("http://127.0.0.1:9").unwrap();
        assert!(matches!(
            client.get_products().await,
            Err(CatalogError::Http(_))
        ));
    }
}
