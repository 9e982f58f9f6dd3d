//! # Product REST API
//!
//! HTTP endpoints for CRUD, filtering and pagination over the product
//! catalog, under `/api/v1/products/`.

pub mod errors;
pub mod filter;
pub mod handler;
pub mod pagination;
pub mod parser;
pub mod response;
pub mod server;

pub use errors::{RestError, RestResult};
pub use filter::ProductFilter;
pub use handler::CatalogHandler;
pub use pagination::{LinkBuilder, PageRequest, Pager, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use parser::{ListParams, OrderBy, SortField};
pub use response::PageResponse;
pub use server::{RestServer, PRODUCTS_PATH};
