//! # Product Filter
//!
//! Builds an AND-combined predicate from list query parameters:
//!
//! | param       | test                              |
//! |-------------|-----------------------------------|
//! | `name`      | case-insensitive substring        |
//! | `min_price` | price >= value                    |
//! | `max_price` | price <= value                    |
//! | `category`  | exact, case-sensitive             |
//!
//! Absent or empty parameters impose no constraint.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::products::{DecimalText, FieldErrors, Product};

/// Parsed list filters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Lowercased substring to look for in the name
    pub name: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub category: Option<String>,
}

impl ProductFilter {
    /// Read the filter parameters out of a query map. Other keys are ignored.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = non_empty(params, "name").map(str::to_lowercase);
        let category = non_empty(params, "category").map(str::to_string);
        let min_price = parse_number(params, "min_price", &mut errors);
        let max_price = parse_number(params, "max_price", &mut errors);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            name,
            min_price,
            max_price,
            category,
        })
    }

    /// True when no constraint is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check if a product matches every set constraint
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(needle) = &self.name {
            if !product.name.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if product.category.as_str() != category {
                return false;
            }
        }
        true
    }

    /// Keep only matching products, preserving order
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        if self.is_empty() {
            return products;
        }
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}

fn non_empty<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

fn parse_number(
    params: &HashMap<String, String>,
    key: &str,
    errors: &mut FieldErrors,
) -> Option<Decimal> {
    let raw = non_empty(params, key)?.trim();
    match DecimalText::parse(raw).and_then(|text| text.to_decimal()) {
        Some(value) => Some(value),
        None => {
            errors.add(key, "Enter a number.");
            None
        }
    }
}
