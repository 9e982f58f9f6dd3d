//! Filtering and ordering tests for the product list endpoint

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use product_catalog::http_server::{HttpServer, ServerConfig};
use product_catalog::products::MemoryStore;

async fn request(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::HOST, "testserver");
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// Router seeded with four products spread over the three categories
async fn catalog() -> Router {
    let store = Arc::new(MemoryStore::new());
    let router = HttpServer::with_config(ServerConfig::default(), store).router();

    let products = [
        ("iPhone Pro", "1000.00", "Electronics"),
        ("Galaxy", "800.00", "Food"),
        ("Ergo Chair", "150.00", "Clothing"),
        ("Huawei", "150.00", "Electronics"),
    ];
    for (name, price, category) in products {
        let payload = json!({
            "name": name,
            "description": format!("{} description", name),
            "quantity": 5,
            "category": category,
            "price": price,
        });
        let (status, _) = request(&router, Method::POST, "/api/v1/products/", Some(payload)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    router
}

async fn names(router: &Router, uri: &str) -> Vec<String> {
    let (status, body) = request(router, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK, "{}", uri);
    body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_filter_min_price() {
    let router = catalog().await;
    assert_eq!(names(&router, "/api/v1/products/?min_price=900").await, ["iPhone Pro"]);
}

#[tokio::test]
async fn test_filter_max_price() {
    let router = catalog().await;
    assert_eq!(
        names(&router, "/api/v1/products/?max_price=200").await,
        ["Ergo Chair", "Huawei"]
    );
}

#[tokio::test]
async fn test_price_bounds_are_inclusive() {
    let router = catalog().await;
    assert_eq!(
        names(&router, "/api/v1/products/?min_price=150&max_price=150").await,
        ["Ergo Chair", "Huawei"]
    );
}

#[tokio::test]
async fn test_filter_category() {
    let router = catalog().await;
    assert_eq!(names(&router, "/api/v1/products/?category=Clothing").await, ["Ergo Chair"]);
    assert!(names(&router, "/api/v1/products/?category=clothing").await.is_empty());
}

#[tokio::test]
async fn test_filter_name_is_case_insensitive_substring() {
    let router = catalog().await;
    assert_eq!(names(&router, "/api/v1/products/?name=PHONE").await, ["iPhone Pro"]);
}

#[tokio::test]
async fn test_combined_filters() {
    let router = catalog().await;
    let uri = "/api/v1/products/?name=Galaxy&min_price=200&max_price=900&category=Food";
    assert_eq!(names(&router, uri).await, ["Galaxy"]);

    let (_, body) = request(&router, Method::GET, uri, None).await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_invalid_price_filter() {
    let router = catalog().await;
    let uri = "/api/v1/products/?min_price=cheap";
    let (status, body) = request(&router, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"errors": {"min_price": ["Enter a number."]}}));
}

#[tokio::test]
async fn test_ordering() {
    let router = catalog().await;
    assert_eq!(
        names(&router, "/api/v1/products/?ordering=-price").await,
        ["iPhone Pro", "Galaxy", "Ergo Chair", "Huawei"]
    );
    assert_eq!(
        names(&router, "/api/v1/products/?ordering=price,-name").await,
        ["Huawei", "Ergo Chair", "Galaxy", "iPhone Pro"]
    );
    assert_eq!(
        names(&router, "/api/v1/products/?ordering=unknown").await,
        ["iPhone Pro", "Galaxy", "Ergo Chair", "Huawei"]
    );
}

#[tokio::test]
async fn test_filtered_pagination_links_keep_query() {
    let router = catalog().await;
    let (status, body) = request(
        &router,
        Method::GET,
        "/api/v1/products/?category=Electronics&page_size=1",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(
        body["next"],
        "http://testserver/api/v1/products/?category=Electronics&page=2&page_size=1"
    );
}

#[tokio::test]
async fn test_filter_out_of_range_page() {
    let router = catalog().await;
    let uri = "/api/v1/products/?category=Food&page=2";
    let (status, body) = request(&router, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Invalid page.");
}
