//! # Response Formatting
//!
//! Standard response bodies for the REST API.

use serde::Serialize;

use crate::products::FieldErrors;

/// One page of a list, with navigation links
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse<T: Serialize> {
    /// Size of the whole filtered set, not just this page
    pub total: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// Field validation failures
#[derive(Debug, Clone, Serialize)]
pub struct ErrorsResponse {
    pub errors: FieldErrors,
}

/// Single-message client error
#[derive(Debug, Clone, Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Server-side failure. Internals are never echoed to the client.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn server_error() -> Self {
        Self {
            error: "A server error occurred.".to_string(),
            code: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_response_serialization() {
        let response = PageResponse {
            total: 2,
            next: None,
            previous: Some("http://testserver/api/v1/products/".to_string()),
            results: vec![json!({"id": 1}), json!({"id": 2})],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["total"], 2);
        assert!(json["next"].is_null());
        assert_eq!(json["previous"], "http://testserver/api/v1/products/");
        assert_eq!(json["results"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_errors_response_serialization() {
        let mut errors = FieldErrors::new();
        errors.add("price", "Price must be a positive value.");

        let json = serde_json::to_value(ErrorsResponse { errors }).unwrap();
        assert_eq!(json, json!({"errors": {"price": ["Price must be a positive value."]}}));
    }
}
