//! Body extractor that insists on an exact `Content-Type`.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app::errors;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Raw request body, accepted only when `Content-Type` is exactly
/// `application/json`; anything else is rejected with 415.
///
/// Parsing is left to the handler so that lookups (404) can run first.
#[derive(Debug)]
pub struct JsonContent(pub Bytes);

#[async_trait]
impl<S> FromRequest<S> for JsonContent
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        check_content_type(req.headers(), JSON_CONTENT_TYPE)?;
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;
        Ok(Self(bytes))
    }
}

pub fn check_content_type(headers: &HeaderMap, expected: &str) -> Result<(), Response> {
    let Some(value) = headers.get(header::CONTENT_TYPE) else {
        tracing::error!("No Content-Type specified.");
        return Err(unsupported(expected));
    };

    if value.as_bytes() != expected.as_bytes() {
        tracing::error!(content_type = ?value, "Invalid Content-Type");
        return Err(unsupported(expected));
    }
    Ok(())
}

fn unsupported(expected: &str) -> Response {
    errors::json_error(
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
        format!("Content-Type must be {expected}"),
    )
}
