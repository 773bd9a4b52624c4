use cacheside_application::use_cases::ProductPage;
use cacheside_domain::{ProductSummary, RequestMetrics};
use serde::Serialize;

/// Raw query parameters; normalization happens in the domain so that
/// malformed values fall back to defaults instead of being rejected.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ProductsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ProductsQuery {
    /// Builds the query from decoded key/value pairs. A key given more than
    /// once is ambiguous and treated as absent.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            page: single_value(pairs, "page"),
            limit: single_value(pairs, "limit"),
        }
    }
}

fn single_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    let mut values = pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v);
    match (values.next(), values.next()) {
        (Some(value), None) => Some(value.clone()),
        _ => None,
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ProductsResponse {
    pub success: bool,
    pub data: Vec<ProductSummary>,
    pub metrics: RequestMetrics,
}

impl From<ProductPage> for ProductsResponse {
    fn from(page: ProductPage) -> Self {
        Self {
            success: true,
            data: page.products,
            metrics: page.metrics,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
