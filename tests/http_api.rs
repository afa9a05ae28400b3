use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use catalog_query_api::{
    catalogue::demo_products,
    error::{StoreError, StoreResult},
    models::Product,
    routes::{MAX_BODY_BYTES, build_router},
    state::AppState,
    store::{DistinctField, InMemoryProductStore, Predicate, ProductStore, QuerySpec},
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Store that fails every call, standing in for a dropped connection.
struct BrokenStore;

#[async_trait]
impl ProductStore for BrokenStore {
    async fn count(&self, _predicates: &[Predicate]) -> StoreResult<u64> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find(&self, _query: &QuerySpec) -> StoreResult<Vec<Product>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn distinct(&self, _field: DistinctField) -> StoreResult<Vec<String>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

fn app() -> Router {
    build_router(AppState::new(Arc::new(InMemoryProductStore::new(
        demo_products(),
    ))))
}

fn broken_app() -> Router {
    build_router(AppState::new(Arc::new(BrokenStore)))
}

async fn send(app: Router, request: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = serde_json::from_slice(&bytes)?;
    Ok((status, body))
}

fn post_json(uri: &str, body: Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?)
}

fn get(uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::get(uri).body(Body::empty())?)
}

#[tokio::test]
async fn products_query_returns_a_filtered_page() -> anyhow::Result<()> {
    let request = post_json(
        "/products-query",
        json!({
            "activePage": "1",
            "sortedBy": "priceAsc",
            "filter": { "category": "Shoes", "minPrice": "90" }
        }),
    )?;
    let (status, body) = send(app(), request).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("All products found."));
    assert_eq!(body["totalCount"], json!(5));

    let prices: Vec<f64> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["price"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, [95.0, 95.0, 110.0, 120.0, 180.0]);
    assert_eq!(body["items"][0]["productName"], json!("Air Zoom Pegasus"));
    assert_eq!(body["items"][0]["categoryName"], json!("Shoes"));
    Ok(())
}

#[tokio::test]
async fn missing_or_malformed_body_uses_defaults() -> anyhow::Result<()> {
    let no_body = Request::post("/products-query").body(Body::empty())?;
    let (status, body) = send(app(), no_body).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCount"], json!(14));
    assert_eq!(body["items"].as_array().unwrap().len(), 9);

    let garbage = Request::post("/products-query")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let (status, body) = send(app(), garbage).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCount"], json!(14));
    Ok(())
}

#[tokio::test]
async fn oversized_body_is_rejected_not_defaulted() -> anyhow::Result<()> {
    let padding = "x".repeat(MAX_BODY_BYTES);
    let request = post_json(
        "/products-query",
        json!({ "searchProduct": padding, "filter": { "brand": "Nike" } }),
    )?;
    let (status, body) = send(app(), request).await?;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        body,
        json!({ "success": false, "message": "Payload Too Large" })
    );
    Ok(())
}

#[tokio::test]
async fn zero_max_price_means_no_upper_bound() -> anyhow::Result<()> {
    let request = post_json("/products-query", json!({ "filter": { "maxPrice": 0 } }))?;
    let (status, body) = send(app(), request).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCount"], json!(14));

    let request = post_json("/products-query", json!({ "filter": { "maxPrice": "0" } }))?;
    let (_, body) = send(app(), request).await?;
    assert_eq!(body["totalCount"], json!(0));
    Ok(())
}

#[tokio::test]
async fn page_far_past_the_end_is_empty() -> anyhow::Result<()> {
    let request = post_json("/products-query", json!({ "activePage": 1e20 }))?;
    let (status, body) = send(app(), request).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCount"], json!(14));
    assert_eq!(body["items"], json!([]));
    Ok(())
}

#[tokio::test]
async fn non_positive_page_is_the_first_page() -> anyhow::Result<()> {
    let (_, first) = send(app(), post_json("/products-query", json!({ "activePage": 1 }))?).await?;
    let (_, negative) =
        send(app(), post_json("/products-query", json!({ "activePage": -3 }))?).await?;
    assert_eq!(first, negative);
    Ok(())
}

#[tokio::test]
async fn distinct_brand_names_lists_each_brand_once() -> anyhow::Result<()> {
    let (status, body) = send(app(), get("/distinct-brand-names")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "All brand names found.",
            "items": ["Nike", "Adidas", "Puma", "Apple", "Samsung"]
        })
    );
    Ok(())
}

#[tokio::test]
async fn distinct_category_names_lists_each_category_once() -> anyhow::Result<()> {
    let (status, body) = send(app(), get("/distinct-category-names")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("All category names found."));
    assert_eq!(body["items"], json!(["Shoes", "Apparel", "Electronics"]));
    Ok(())
}

#[tokio::test]
async fn legacy_paths_reach_the_same_handlers() -> anyhow::Result<()> {
    let (status, body) = send(app(), post_json("/api/products", json!({}))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalCount"], json!(14));

    let (status, body) = send(app(), get("/api/all-brand")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 5);

    let (status, body) = send(app(), get("/api/all-category")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 3);
    Ok(())
}

#[tokio::test]
async fn store_failures_are_opaque_500s() -> anyhow::Result<()> {
    let expected = json!({ "success": false, "message": "Internal Server Error!" });

    let (status, body) = send(broken_app(), post_json("/products-query", json!({}))?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected);

    let (status, body) = send(broken_app(), get("/distinct-brand-names")?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected);

    let (status, body) = send(broken_app(), get("/distinct-category-names")?).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, expected);
    Ok(())
}

#[tokio::test]
async fn unknown_routes_are_404() -> anyhow::Result<()> {
    let (status, body) = send(app(), get("/does-not-exist")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "message": "Not Found" }));
    Ok(())
}

#[tokio::test]
async fn home_route_greets() -> anyhow::Result<()> {
    let response = app().oneshot(get("/")?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    assert_eq!(&bytes[..], b"Welcome to easyshop server.");
    Ok(())
}
