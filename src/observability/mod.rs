//! Observability for the catalog service
//!
//! Structured logging through `tracing`. Request spans come from
//! `tower_http::trace::TraceLayer` in the HTTP server.

mod logger;

pub use logger::{env_filter, init_tracing};
