//! # HTTP Server Module
//!
//! Wires the product API into a runnable Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/v1/products/*` - Product CRUD, filtering and pagination

pub mod config;
pub mod observability_routes;
pub mod server;

pub use config::{ConfigError, ServerConfig};
pub use server::HttpServer;
