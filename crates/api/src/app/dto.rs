use axum::http::{header, HeaderMap, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use catalog_products::{parse_available_flag, Category, Product, ProductId, ProductQuery};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Query string of `GET /products`. Empty values do not filter.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsParams {
    pub category: Option<String>,
    pub available: Option<String>,
    pub name: Option<String>,
}

impl ListProductsParams {
    /// Translate into a repository query.
    ///
    /// Returns `None` when the filter can match nothing (a category that is
    /// not part of the enumeration).
    pub fn to_query(&self) -> Option<ProductQuery> {
        let mut query = ProductQuery::all();

        if let Some(name) = non_empty(&self.name) {
            query = query.with_name(name);
        }
        if let Some(raw) = non_empty(&self.category) {
            query = query.with_category(Category::parse_ignore_case(raw)?);
        }
        if let Some(raw) = non_empty(&self.available) {
            query = query.with_available(parse_available_flag(raw));
        }
        Some(query)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Parse a request body as JSON; malformed input is a 400.
pub fn parse_document(body: &[u8]) -> Result<Value, axum::response::Response> {
    serde_json::from_slice(body).map_err(|e| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            format!("Invalid product: body of request contained bad or no data: {e}"),
        )
    })
}

// -------------------------
// Response envelopes
// -------------------------

pub const SUCCESS: &str = "Success";
pub const DELETED: &str = "Product has been Deleted!";

pub fn product_envelope(product: &Product) -> Value {
    json!({ "message": SUCCESS, "product": product })
}

pub fn results_envelope(products: &[Product]) -> Value {
    json!({ "message": SUCCESS, "results": products })
}

pub fn message_envelope(message: &str) -> Value {
    json!({ "message": message })
}

/// Absolute URL of a product, built from the request's `Host` header when present.
pub fn product_location(headers: &HeaderMap, id: ProductId) -> String {
    match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("http://{host}/products/{id}"),
        None => format!("/products/{id}"),
    }
}
