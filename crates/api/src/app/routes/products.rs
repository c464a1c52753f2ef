use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use catalog_products::ProductId;

use crate::app::dto::{self, ListProductsParams};
use crate::app::errors;
use crate::app::extract::JsonContent;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    JsonContent(body): JsonContent,
) -> axum::response::Response {
    tracing::info!("Request to Create a Product...");
    let document = match dto::parse_document(&body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    tracing::info!(%document, "Processing product document");

    let product = match services.products_create(&document).await {
        Ok(p) => p,
        Err(e) => return errors::service_error_to_response(e),
    };
    tracing::info!(id = %product.id(), "Product saved");

    let location = dto::product_location(&headers, product.id());
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(dto::product_envelope(&product)),
    )
        .into_response()
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<ListProductsParams>,
) -> axum::response::Response {
    tracing::info!(?params, "Request to list products");

    let Some(query) = params.to_query() else {
        return (StatusCode::OK, Json(dto::results_envelope(&[]))).into_response();
    };

    match services.products_list(&query).await {
        Ok(products) => (StatusCode::OK, Json(dto::results_envelope(&products))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    tracing::info!(%id, "Request to Retrieve a product");
    let Ok(product_id) = id.parse::<ProductId>() else {
        return errors::product_not_found(&id);
    };

    match services.products_get(product_id).await {
        Ok(Some(product)) => {
            tracing::info!(name = product.name(), "Returning product");
            (StatusCode::OK, Json(dto::product_envelope(&product))).into_response()
        }
        Ok(None) => errors::product_not_found(product_id),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    JsonContent(body): JsonContent,
) -> axum::response::Response {
    tracing::info!(%id, "Request to Update a product");
    let Ok(product_id) = id.parse::<ProductId>() else {
        return errors::product_not_found(&id);
    };

    match services.products_get(product_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return errors::product_not_found(product_id),
        Err(e) => return errors::service_error_to_response(e),
    }

    let document = match dto::parse_document(&body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.products_update(product_id, &document).await {
        Ok(Some(product)) => (StatusCode::OK, Json(dto::product_envelope(&product))).into_response(),
        // Deleted between the lookup and the write.
        Ok(None) => errors::product_not_found(product_id),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    tracing::info!(%id, "Request to Delete a product");
    let Ok(product_id) = id.parse::<ProductId>() else {
        return errors::product_not_found(&id);
    };

    match services.products_delete(product_id).await {
        Ok(existed) => {
            if !existed {
                tracing::debug!(%product_id, "delete of absent product");
            }
            (StatusCode::OK, Json(dto::message_envelope(dto::DELETED))).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}
