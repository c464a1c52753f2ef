use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use catalog_core::DomainError;
use catalog_infra::{
    AppConfig, InMemoryProductRepository, PostgresProductRepository, ProductRepository,
    RepositoryError, StoreConfig,
};
use catalog_products::{Product, ProductDraft, ProductId, ProductQuery};

/// Failure of a product operation, before it is mapped to HTTP.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Shared state behind every handler.
#[derive(Clone)]
pub struct AppServices {
    products: Arc<dyn ProductRepository>,
}

impl std::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppServices").finish_non_exhaustive()
    }
}

impl AppServices {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    /// Services over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryProductRepository::new()))
    }

    /// Validate a product document and store it.
    pub async fn products_create(&self, document: &Value) -> Result<Product, ServiceError> {
        let draft = ProductDraft::from_json(document)?;
        Ok(self.products.create(draft).await?)
    }

    pub async fn products_get(&self, id: ProductId) -> Result<Option<Product>, ServiceError> {
        Ok(self.products.find(id).await?)
    }

    /// Validate a product document and fully replace record `id` with it.
    ///
    /// Returns `None` when the record does not exist.
    pub async fn products_update(
        &self,
        id: ProductId,
        document: &Value,
    ) -> Result<Option<Product>, ServiceError> {
        let draft = ProductDraft::from_json(document)?;
        Ok(self.products.update(id, draft).await?)
    }

    /// Remove record `id`; returns whether it existed.
    pub async fn products_delete(&self, id: ProductId) -> Result<bool, ServiceError> {
        Ok(self.products.delete(id).await?)
    }

    pub async fn products_list(&self, query: &ProductQuery) -> Result<Vec<Product>, ServiceError> {
        Ok(self.products.list(query).await?)
    }
}

/// Wire the product store selected by `config`.
pub async fn build_services(config: &AppConfig) -> Result<AppServices, RepositoryError> {
    match &config.store {
        StoreConfig::InMemory => {
            tracing::warn!("USE_PERSISTENT_STORES not enabled; products are kept in memory");
            Ok(AppServices::in_memory())
        }
        StoreConfig::Postgres { database_url } => {
            let repo = PostgresProductRepository::connect(database_url).await?;
            tracing::info!("connected to postgres product store");
            Ok(AppServices::new(Arc::new(repo)))
        }
    }
}
