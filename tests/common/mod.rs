#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use product_catalog::transport::http::{create_router, AppState};
use product_catalog::{seed_sample_products, Database, Product, SqliteRepository};
use serde_json::Value as JsonValue;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub products: SqliteRepository<Product>,
}

/// In-memory store with the schema created and, optionally, the nine sample products.
pub async fn spawn_app(seed: bool) -> TestApp {
    let database = Database::in_memory().await.unwrap();
    database.create_schema::<Product>().await.unwrap();
    let products = SqliteRepository::<Product>::new(database.pool().clone());
    if seed {
        seed_sample_products(&products).await.unwrap();
    }
    let router = create_router(AppState {
        products: products.clone(),
        database,
    });
    TestApp { router, products }
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, JsonValue) {
    let (status, bytes) = get(router, uri).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn post_raw(router: &Router, uri: &str, content_type: &str, body: &str) -> (StatusCode, JsonValue) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", content_type)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn post_json(router: &Router, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
    post_raw(router, uri, "application/json", &body.to_string()).await
}
