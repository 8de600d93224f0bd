//! Blogbox catalog API library.
//!
//! This crate provides the catalog server as a library, allowing it to be
//! tested and embedded. The `blogbox-api` binary adds Sentry and binds a
//! socket; [`app`] is everything else.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the API router with CORS and request tracing applied.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([state.config().cors_origin.clone()]))
        .allow_methods(Any)
        .allow_headers(Any);

    routes::routes()
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    use blogbox_core::Product;

    use super::*;
    use crate::config::ApiConfig;
    use crate::db::{NewProduct, ProductRepository, create_memory_pool};

    async fn test_app() -> (Router, AppState) {
        let config = ApiConfig::from_lookup(|_| None).unwrap();
        let pool = create_memory_pool().await.unwrap();
        let state = AppState::new(config, pool);
        (app(state.clone()), state)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app().await;
        let (status, body) = get(app.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");

        let (status, _) = get(app, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_products() {
        let (app, state) = test_app().await;
        let repo = ProductRepository::new(state.pool());
        repo.create(&NewProduct::new("Mug", Decimal::from(10))).await.unwrap();
        repo.create(&NewProduct::new("Pen", Decimal::new(250, 2)).sale_price(Decimal::TWO))
            .await
            .unwrap();

        let (status, body) = get(app, "/products").await;
        assert_eq!(status, StatusCode::OK);

        let products: Vec<Product> = serde_json::from_slice(&body).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].name, "Pen");
        assert!(products[1].is_on_sale);
        assert_eq!(products[1].effective_price(), Decimal::TWO);
    }

    #[tokio::test]
    async fn test_prices_are_json_numbers() {
        let (app, state) = test_app().await;
        ProductRepository::new(state.pool())
            .create(&NewProduct::new("Pen", Decimal::new(1299, 2)).sale_price(Decimal::new(999, 2)))
            .await
            .unwrap();

        let (status, body) = get(app, "/products").await;
        assert_eq!(status, StatusCode::OK);

        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(body[0]["price"].is_number());
        assert!(body[0]["salePrice"].is_number());
        assert_eq!(body[0]["price"], serde_json::json!(12.99));
    }

    #[tokio::test]
    async fn test_show_product_and_missing_product() {
        let (app, state) = test_app().await;
        let created = ProductRepository::new(state.pool())
            .create(&NewProduct::new("Mug", Decimal::from(10)))
            .await
            .unwrap();

        let (status, body) = get(app.clone(), &format!("/products/{}", created.id)).await;
        assert_eq!(status, StatusCode::OK);
        let product: Product = serde_json::from_slice(&body).unwrap();
        assert_eq!(product, created);

        let (status, body) = get(app.clone(), "/products/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, b"Not found: product 999");

        let (status, _) = get(app, "/products/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cors_allows_only_configured_origin() {
        let (app, _) = test_app().await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/products")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/products")
                    .header(header::ORIGIN, "http://evil.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }
}
