use std::collections::BTreeMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tracing::instrument;

use catalog_products::{Product, ProductDraft, ProductId, ProductQuery};

use super::{ProductRepository, RepositoryError};

/// In-memory product store for tests/dev.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    inner: RwLock<BTreeMap<ProductId, Product>>,
    next_id: AtomicI64,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        let id = ProductId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let product = Product::new(id, draft);

        let mut map = self.inner.write().map_err(|_| RepositoryError::Poisoned)?;
        map.insert(id, product.clone());
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let map = self.inner.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(map.get(&id).cloned())
    }

    #[instrument(skip(self, draft))]
    async fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut map = self.inner.write().map_err(|_| RepositoryError::Poisoned)?;
        Ok(map.get_mut(&id).map(|product| {
            product.replace(draft);
            product.clone()
        }))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let mut map = self.inner.write().map_err(|_| RepositoryError::Poisoned)?;
        Ok(map.remove(&id).is_some())
    }

    #[instrument(skip(self))]
    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, RepositoryError> {
        let map = self.inner.read().map_err(|_| RepositoryError::Poisoned)?;
        Ok(map.values().filter(|p| query.matches(p)).cloned().collect())
    }
}
