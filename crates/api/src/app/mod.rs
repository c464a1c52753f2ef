//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: repository wiring and the product operations handlers call
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response envelopes and JSON mapping helpers
//! - `errors.rs`: consistent error responses
//! - `extract.rs`: content-type checking body extractor
//! - `web.rs`: the server-rendered administration page

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;
pub mod services;
pub mod web;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: Arc<services::AppServices>) -> anyhow::Result<Router> {
    let page = Arc::new(web::PageRenderer::new()?);

    let app = Router::new()
        .route("/health", get(routes::system::health))
        .route("/", get(routes::web::index).post(routes::web::submit))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::log_requests))
                .layer(Extension(services))
                .layer(Extension(page)),
        );

    Ok(app)
}
