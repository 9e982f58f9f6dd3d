//! product-catalog - A small REST catalog of products
//!
//! Products carry a name, description, quantity, category and a two-decimal
//! price. The HTTP API supports CRUD, filtering, ordering and page-number
//! pagination; storage is in memory or a JSON data file.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod products;
pub mod rest_api;
