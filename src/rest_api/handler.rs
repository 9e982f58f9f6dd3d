//! # Catalog Handler
//!
//! Per-verb operations over the product store. HTTP concerns (extractors,
//! status codes) live in [`super::server`]; this layer only speaks products
//! and [`RestError`].

use std::sync::Arc;

use serde_json::Value;

use crate::products::{validate_changes, validate_new, Product, ProductStore};

use super::errors::{RestError, RestResult};
use super::pagination::{LinkBuilder, Pager};
use super::parser::{sort_products, ListParams};
use super::response::PageResponse;

/// Product operations backed by a [`ProductStore`]
#[derive(Clone)]
pub struct CatalogHandler {
    store: Arc<dyn ProductStore>,
    pager: Pager,
}

impl CatalogHandler {
    pub fn new(store: Arc<dyn ProductStore>, pager: Pager) -> Self {
        Self { store, pager }
    }

    /// Filter, order and paginate
    pub fn list(
        &self,
        params: &ListParams,
        links: &LinkBuilder,
    ) -> RestResult<PageResponse<Product>> {
        let mut products = params.filter.apply(self.store.list()?);
        sort_products(&mut products, &params.order);
        self.pager.paginate(products, &params.page, links)
    }

    /// Get a single product by id
    pub fn get(&self, id: u64) -> RestResult<Product> {
        self.store.get(id)?.ok_or(RestError::NotFound)
    }

    /// Validate and store a new product
    pub fn create(&self, body: &Value) -> RestResult<Product> {
        let new = validate_new(body).map_err(RestError::Validation)?;
        let product = self.store.insert(new)?;
        tracing::info!(id = product.id, "product created");
        Ok(product)
    }

    /// Replace every field of an existing product
    pub fn replace(&self, id: u64, body: &Value) -> RestResult<Product> {
        self.get(id)?;
        let new = validate_new(body).map_err(RestError::Validation)?;
        let product = self.store.replace(id, new)?.ok_or(RestError::NotFound)?;
        tracing::info!(id, "product replaced");
        Ok(product)
    }

    /// Update only the submitted fields of an existing product
    pub fn partial_update(&self, id: u64, body: &Value) -> RestResult<Product> {
        self.get(id)?;
        let changes = validate_changes(body).map_err(RestError::Validation)?;
        let product = self.store.update(id, changes)?.ok_or(RestError::NotFound)?;
        tracing::info!(id, "product updated");
        Ok(product)
    }

    /// Remove a product
    pub fn delete(&self, id: u64) -> RestResult<()> {
        if !self.store.delete(id)? {
            return Err(RestError::NotFound);
        }
        tracing::info!(id, "product deleted");
        Ok(())
    }
}
