//! # Products
//!
//! The catalog's single resource: the entity, its validator, and the
//! repository it is stored in.

pub mod decimal_text;
pub mod errors;
pub mod model;
pub mod seed;
pub mod store;
pub mod validator;

pub use decimal_text::DecimalText;
pub use errors::{StoreError, StoreResult};
pub use model::{format_price, Category, NewProduct, Product, ProductChanges};
pub use store::{FileStore, MemoryStore, ProductStore};
pub use validator::{validate_changes, validate_new, FieldErrors};
