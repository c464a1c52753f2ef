//! Postgres-backed product repository.
//!
//! ## Schema
//!
//! [`PostgresProductRepository::ensure_schema`] creates the `products` table
//! when it does not exist yet. Column widths mirror the validation limits of
//! the products domain crate (`VARCHAR(100)` names, `VARCHAR(250)`
//! descriptions, `NUMERIC(14, 2)` prices). Categories are stored as their
//! upper-case variant names.
//!
//! ## Error Mapping
//!
//! Every SQLx error becomes [`RepositoryError::Database`] tagged with the
//! operation that failed. A stored category that no longer names a variant
//! is reported the same way (operation `decode_row`).

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Row};
use tracing::{Span, instrument};

use catalog_products::{Category, Product, ProductDraft, ProductId, ProductQuery};

use super::{ProductRepository, RepositoryError};

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          BIGSERIAL PRIMARY KEY,
    name        VARCHAR(100) NOT NULL,
    description VARCHAR(250) NOT NULL,
    price       NUMERIC(14, 2) NOT NULL,
    available   BOOLEAN NOT NULL DEFAULT TRUE,
    category    VARCHAR(32) NOT NULL DEFAULT 'UNKNOWN'
)
"#;

const COLUMNS: &str = "id, name, description, price, available, category";

/// Postgres-backed product repository.
///
/// Clones share the same SQLx connection pool.
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    /// Create a repository over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` and make sure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        let repo = Self::new(pool);
        repo.ensure_schema().await?;
        Ok(repo)
    }

    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    #[instrument(skip(self, draft), fields(name = %draft.name, id = tracing::field::Empty), err)]
    async fn create(&self, draft: ProductDraft) -> Result<Product, RepositoryError> {
        let sql = format!(
            "INSERT INTO products (name, description, price, available, category) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.price)
            .bind(draft.available)
            .bind(draft.category.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("create", e))?;

        let product = Product::try_from(row)?;
        Span::current().record("id", product.id().get());
        Ok(product)
    }

    #[instrument(skip(self), err)]
    async fn find(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find", e))?;

        row.map(Product::try_from).transpose()
    }

    #[instrument(skip(self, draft), err)]
    async fn update(
        &self,
        id: ProductId,
        draft: ProductDraft,
    ) -> Result<Option<Product>, RepositoryError> {
        let sql = format!(
            "UPDATE products \
             SET name = $1, description = $2, price = $3, available = $4, category = $5 \
             WHERE id = $6 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.price)
            .bind(draft.available)
            .bind(draft.category.as_str())
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update", e))?;

        row.map(Product::try_from).transpose()
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), err)]
    async fn list(&self, query: &ProductQuery) -> Result<Vec<Product>, RepositoryError> {
        let mut builder = list_query(query);
        let rows = builder
            .build_query_as::<ProductRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list", e))?;

        rows.into_iter().map(Product::try_from).collect()
    }
}

/// Build the filtered `SELECT` for [`ProductRepository::list`].
fn list_query(query: &ProductQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(format!("SELECT {COLUMNS} FROM products WHERE TRUE"));

    if let Some(name) = &query.name {
        builder.push(" AND name = ").push_bind(name.clone());
    }
    if let Some(category) = query.category {
        builder.push(" AND category = ").push_bind(category.as_str());
    }
    if let Some(available) = query.available {
        builder.push(" AND available = ").push_bind(available);
    }

    builder.push(" ORDER BY id ASC");
    builder
}

/// Raw `products` row, before the category is checked.
#[derive(Debug, Clone, PartialEq)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: Decimal,
    available: bool,
    category: String,
}

impl<'r> FromRow<'r, PgRow> for ProductRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            available: row.try_get("available")?,
            category: row.try_get("category")?,
        })
    }
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse::<Category>()
            .map_err(|e| RepositoryError::Database {
                operation: "decode_row",
                message: e.to_string(),
            })?;

        Ok(Product::new(
            ProductId::new(row.id),
            ProductDraft {
                name: row.name,
                description: row.description,
                price: row.price,
                available: row.available,
                category,
            },
        ))
    }
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> RepositoryError {
    tracing::error!(operation, error = %err, "product store query failed");
    RepositoryError::Database {
        operation,
        message: err.to_string(),
    }
}
