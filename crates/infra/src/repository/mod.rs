//! Product persistence.
//!
//! Handlers only ever see [`ProductRepository`]; which backend sits behind it
//! is decided once at startup from [`crate::config::StoreConfig`].

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use catalog_products::{Product, ProductDraft, ProductId, ProductQuery};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryProductRepository;
pub use postgres::PostgresProductRepository;

/// Storage failure (never a "not found": absence is reported as `None`/`false`).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error during {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },

    #[error("store lock poisoned")]
    Poisoned,
}

/// CRUD over product records.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new record; the repository assigns the id.
    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError>;

    async fn find(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Full replace. Returns `None` when no record has this id.
    async fn update(&self, id: ProductId, draft: ProductDraft)
    -> Result<Option<Product>, RepositoryError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError>;

    /// Records matching `query`, ordered by id.
    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, RepositoryError>;
}

#[async_trait]
impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        (**self).create(draft).await
    }

    async fn find(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        (**self).find(id).await
    }

    async fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Option<Product>, RepositoryError> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        (**self).delete(id).await
    }

    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, RepositoryError> {
        (**self).list(query).await
    }
}
