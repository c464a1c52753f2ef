//! Cucumber acceptance suite for the catalog service.
//!
//! Scenarios run against `BASE_URL` when it is set (for example a deployed
//! instance or `http://localhost:8080`); otherwise an in-process server with
//! an in-memory store is started on an ephemeral port. Every scenario resets
//! the catalog through the REST API, so scenarios run one at a time.

use std::sync::{Arc, OnceLock};

use catalog_api::app::{build_app, services::AppServices};
use cucumber::World;
use serde_json::Value;

mod browser;

use browser::Browser;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";

static BASE_URL: OnceLock<String> = OnceLock::new();

/// Status and decoded body of the last REST call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// Shared state for Cucumber scenarios.
#[derive(Debug, Default, World)]
pub struct CatalogWorld {
    pub client: reqwest::Client,
    pub browser: Browser,
    /// Value captured by the copy step.
    pub clipboard: String,
    pub response: Option<ApiResponse>,
}

impl CatalogWorld {
    pub fn url(&self, path: &str) -> String {
        let base = BASE_URL.get().map_or(DEFAULT_BASE_URL, String::as_str);
        format!("{base}{path}")
    }
}

async fn spawn_service() -> String {
    let app = build_app(Arc::new(AppServices::in_memory())).expect("failed to build app");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind ephemeral port");
    let addr = listener.local_addr().expect("listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("catalog service stopped");
    });

    format!("http://{addr}")
}

#[tokio::main]
async fn main() {
    let base_url = match std::env::var("BASE_URL") {
        Ok(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
        _ => spawn_service().await,
    };
    BASE_URL.get_or_init(|| base_url);

    CatalogWorld::cucumber()
        .max_concurrent_scenarios(1)
        .run_and_exit("tests/features")
        .await;
}
