use axum::Router;

pub mod products;
pub mod system;
pub mod web;

/// Router for the REST resources.
pub fn router() -> Router {
    Router::new().nest("/products", products::router())
}
