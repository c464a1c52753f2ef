use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalog_core::DomainError;

use crate::app::services::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(DomainError::Validation(msg)) => json_error(StatusCode::BAD_REQUEST, msg),
        ServiceError::Domain(DomainError::InvalidId(msg)) => json_error(StatusCode::NOT_FOUND, msg),
        ServiceError::Repository(e) => {
            tracing::error!(error = %e, "product store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

pub fn product_not_found(id: impl std::fmt::Display) -> axum::response::Response {
    json_error(
        StatusCode::NOT_FOUND,
        format!("Product with id '{id}' was not found."),
    )
}

/// Uniform error body: `{"status": 404, "error": "Not Found", "message": "..."}`.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": message.into(),
        })),
    )
        .into_response()
}
