//! Observability HTTP Routes
//!
//! Liveness endpoint reporting the build version and catalog size.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::products::ProductStore;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Stored product count; absent when the store is unreadable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<usize>,
}

/// Health check route at `/health`
pub fn health_routes(store: Arc<dyn ProductStore>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(store)
}

/// Health check handler. A failing store reports 503.
async fn health_handler(
    State(store): State<Arc<dyn ProductStore>>,
) -> (StatusCode, Json<HealthResponse>) {
    let version = env!("CARGO_PKG_VERSION");

    let count = tokio::task::spawn_blocking(move || store.len())
        .await
        .map_err(|e| e.to_string())
        .and_then(|result| result.map_err(|e| e.to_string()));

    match count {
        Ok(count) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                version,
                products: Some(count),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check could not read store");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    version,
                    products: None,
                }),
            )
        }
    }
}
