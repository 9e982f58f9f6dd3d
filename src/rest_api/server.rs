//! # REST API HTTP Routes
//!
//! Axum routes for the product resource. Every route answers with and
//! without the trailing slash.

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, Path, Query, State},
    http::{header::HOST, HeaderMap, StatusCode, Uri},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::products::Product;

use super::errors::{RestError, RestResult};
use super::handler::CatalogHandler;
use super::pagination::LinkBuilder;
use super::parser::ListParams;
use super::response::PageResponse;

/// Collection path
pub const PRODUCTS_PATH: &str = "/api/v1/products";

/// REST API server state
pub struct RestServer {
    handler: CatalogHandler,
}

impl RestServer {
    pub fn new(handler: CatalogHandler) -> Self {
        Self { handler }
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        let collection = get(list_handler).post(create_handler);
        let item = get(get_handler)
            .put(replace_handler)
            .patch(partial_update_handler)
            .delete(delete_handler);

        Router::new()
            .route(PRODUCTS_PATH, collection.clone())
            .route(&format!("{}/", PRODUCTS_PATH), collection)
            .route(&format!("{}/{{id}}", PRODUCTS_PATH), item.clone())
            .route(&format!("{}/{{id}}/", PRODUCTS_PATH), item)
            .with_state(self.handler)
    }
}

/// Host used in pagination links
fn request_host(headers: &HeaderMap, uri: &Uri) -> String {
    headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .unwrap_or_else(|| "localhost".to_string())
}

/// Ids that are not integers cannot exist
fn parse_id(raw: &str) -> RestResult<u64> {
    raw.parse().map_err(|_| RestError::NotFound)
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> RestResult<Value> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(JsonRejection::MissingJsonContentType(_)) => Err(RestError::UnsupportedMediaType),
        Err(rejection) => Err(RestError::MalformedBody(rejection.body_text())),
    }
}

/// Run a store-backed operation on the blocking pool. File-backed stores
/// write to disk while holding their lock.
async fn blocking<T, F>(op: F) -> RestResult<T>
where
    F: FnOnce() -> RestResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| RestError::TaskFailed(e.to_string()))?
}

/// List products handler
async fn list_handler(
    State(handler): State<CatalogHandler>,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<PageResponse<Product>>, RestError> {
    let params = ListParams::parse(&query)?;
    let links = LinkBuilder::new(&request_host(&headers, &uri), uri.path(), uri.query());

    let page = blocking(move || handler.list(&params, &links)).await?;
    Ok(Json(page))
}

/// Get single product handler
async fn get_handler(
    State(handler): State<CatalogHandler>,
    Path(id): Path<String>,
) -> Result<Json<Product>, RestError> {
    let id = parse_id(&id)?;
    let product = blocking(move || handler.get(id)).await?;
    Ok(Json(product))
}

/// Create product handler. Success carries no body.
async fn create_handler(
    State(handler): State<CatalogHandler>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<StatusCode, RestError> {
    let body = json_body(body)?;
    blocking(move || handler.create(&body)).await?;
    Ok(StatusCode::CREATED)
}

/// Full replace handler
async fn replace_handler(
    State(handler): State<CatalogHandler>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Product>, RestError> {
    let id = parse_id(&id)?;
    let body = json_body(body)?;
    let product = blocking(move || handler.replace(id, &body)).await?;
    Ok(Json(product))
}

/// Partial update handler
async fn partial_update_handler(
    State(handler): State<CatalogHandler>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Product>, RestError> {
    let id = parse_id(&id)?;
    let body = json_body(body)?;
    let product = blocking(move || handler.partial_update(id, &body)).await?;
    Ok(Json(product))
}

/// Delete product handler
async fn delete_handler(
    State(handler): State<CatalogHandler>,
    Path(id): Path<String>,
) -> Result<StatusCode, RestError> {
    let id = parse_id(&id)?;
    blocking(move || handler.delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::MemoryStore;
    use crate::rest_api::pagination::Pager;
    use std::sync::Arc;

    #[test]
    fn test_router_builds() {
        let handler = CatalogHandler::new(Arc::new(MemoryStore::new()), Pager::default());
        let _router = RestServer::new(handler).router();
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(matches!(parse_id("abc"), Err(RestError::NotFound)));
        assert!(matches!(parse_id("-1"), Err(RestError::NotFound)));
    }

    #[test]
    fn test_request_host_prefers_header() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, "shop.local".parse().unwrap());
        let uri: Uri = "/api/v1/products/".parse().unwrap();
        assert_eq!(request_host(&headers, &uri), "shop.local");
        assert_eq!(request_host(&HeaderMap::new(), &uri), "localhost");
    }

    #[tokio::test]
    async fn test_blocking_passes_results_through() {
        let handler = CatalogHandler::new(Arc::new(MemoryStore::new()), Pager::default());
        let result = blocking(move || handler.get(7)).await;
        assert!(matches!(result, Err(RestError::NotFound)));

        let value = blocking(|| Ok(3)).await.unwrap();
        assert_eq!(value, 3);
    }

    #[tokio::test]
    async fn test_blocking_reports_panics_as_server_errors() {
        let result: RestResult<()> = blocking(|| panic!("store exploded")).await;
        let err = result.unwrap_err();
        assert!(matches!(err, RestError::TaskFailed(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
