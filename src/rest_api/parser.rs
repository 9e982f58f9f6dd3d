//! # Query Parameter Parser
//!
//! Parses list query parameters into a filter, an ordering and a page request.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::products::Product;

use super::errors::{RestError, RestResult};
use super::filter::ProductFilter;
use super::pagination::PageRequest;

/// Parsed list parameters
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub filter: ProductFilter,

    /// Order by clauses; empty means by id
    pub order: Vec<OrderBy>,

    pub page: PageRequest,
}

impl ListParams {
    /// Parse query parameters from a HashMap
    pub fn parse(params: &HashMap<String, String>) -> RestResult<Self> {
        let filter = ProductFilter::from_query(params).map_err(RestError::InvalidQuery)?;
        let order = params
            .get("ordering")
            .map(|value| parse_ordering(value))
            .unwrap_or_default();
        let page = PageRequest {
            page: params.get("page").cloned(),
            page_size: params.get("page_size").cloned(),
        };

        Ok(Self {
            filter,
            order,
            page,
        })
    }
}

/// Sortable product columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Description,
    Price,
    Quantity,
    Category,
}

impl SortField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "id" => Some(SortField::Id),
            "name" => Some(SortField::Name),
            "description" => Some(SortField::Description),
            "price" => Some(SortField::Price),
            "quantity" => Some(SortField::Quantity),
            "category" => Some(SortField::Category),
            _ => None,
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Name => a.name.cmp(&b.name),
            SortField::Description => a.description.cmp(&b.description),
            SortField::Price => a.price.cmp(&b.price),
            SortField::Quantity => a.quantity.cmp(&b.quantity),
            SortField::Category => a.category.as_str().cmp(b.category.as_str()),
        }
    }
}

/// Order by clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub field: SortField,
    pub ascending: bool,
}

impl OrderBy {
    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let cmp = self.field.compare(a, b);
        if self.ascending {
            cmp
        } else {
            cmp.reverse()
        }
    }
}

/// Parse `ordering` (comma-separated fields, `-` prefix for descending).
/// Unknown fields are dropped.
fn parse_ordering(value: &str) -> Vec<OrderBy> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            let (name, ascending) = match part.strip_prefix('-') {
                Some(name) => (name, false),
                None => (part, true),
            };
            SortField::parse(name).map(|field| OrderBy { field, ascending })
        })
        .collect()
}

/// Sort products by the given clauses, falling back to ascending id so the
/// order is total
pub fn sort_products(products: &mut [Product], order: &[OrderBy]) {
    products.sort_by(|a, b| {
        order
            .iter()
            .map(|clause| clause.compare(a, b))
            .find(|cmp| *cmp != Ordering::Equal)
            .unwrap_or_else(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::products::Category;
    use rust_decimal::Decimal;

    fn product(id: u64, name: &str, price: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: String::new(),
            quantity: 1,
            category: Category::Food,
            price: Decimal::from(price),
        }
    }

    #[test]
    fn test_parse_ordering() {
        let orders = parse_ordering("-price,name");
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].field, SortField::Price);
        assert!(!orders[0].ascending);
        assert_eq!(orders[1].field, SortField::Name);
        assert!(orders[1].ascending);
    }

    #[test]
    fn test_unknown_ordering_fields_are_dropped() {
        assert!(parse_ordering("colour,-weight").is_empty());
        assert_eq!(parse_ordering("bogus,-id").len(), 1);
    }

    #[test]
    fn test_sort_falls_back_to_id() {
        let mut products = vec![
            product(3, "b", 150),
            product(1, "a", 1000),
            product(2, "c", 150),
        ];

        sort_products(&mut products, &parse_ordering("price"));
        let ids: Vec<u64> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);

        sort_products(&mut products, &[]);
        let ids: Vec<u64> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_full_list_params() {
        let mut params = HashMap::new();
        params.insert("name".to_string(), "galaxy".to_string());
        params.insert("ordering".to_string(), "-price".to_string());
        params.insert("page".to_string(), "2".to_string());
        params.insert("page_size".to_string(), "10".to_string());

        let parsed = ListParams::parse(&params).unwrap();
        assert_eq!(parsed.filter.name.as_deref(), Some("galaxy"));
        assert_eq!(parsed.order.len(), 1);
        assert_eq!(parsed.page.page.as_deref(), Some("2"));
        assert_eq!(parsed.page.page_size.as_deref(), Some("10"));
    }

    #[test]
    fn test_invalid_filter_is_a_query_error() {
        let mut params = HashMap::new();
        params.insert("max_price".to_string(), "lots".to_string());

        let result = ListParams::parse(&params);
        assert!(matches!(result, Err(RestError::InvalidQuery(_))));
    }
}
