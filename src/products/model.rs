//! # Product Entity
//!
//! The single catalog record and its closed category set.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    Food,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 3] = [Category::Electronics, Category::Clothing, Category::Food];

    /// Get the wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Food => "Food",
        }
    }

    /// Parse a category name. Matching is exact and case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored product
///
/// Field order matches the JSON shape returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub category: Category,
    #[serde(with = "price_format")]
    pub price: Decimal,
}

/// A validated product that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub quantity: u32,
    pub category: Category,
    pub price: Decimal,
}

impl NewProduct {
    /// Attach a server-assigned id
    pub fn into_product(self, id: u64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            quantity: self.quantity,
            category: self.category,
            price: self.price,
        }
    }
}

/// A validated subset of product fields, as submitted by PATCH
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<u32>,
    pub category: Option<Category>,
    pub price: Option<Decimal>,
}

impl ProductChanges {
    /// True when no field was submitted
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.quantity.is_none()
            && self.category.is_none()
            && self.price.is_none()
    }

    /// Write the submitted fields onto an existing product
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(quantity) = self.quantity {
            product.quantity = quantity;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
    }
}

/// Render a price with exactly two fractional digits
pub fn format_price(price: &Decimal) -> String {
    let mut fixed = *price;
    fixed.rescale(2);
    fixed.to_string()
}

/// Prices travel as fixed two-decimal strings, never as floats
mod price_format {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(price: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_price(price))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Decimal::from_str(&raw).map_err(de::Error::custom)
    }
}
