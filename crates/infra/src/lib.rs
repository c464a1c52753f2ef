//! Infrastructure layer: persistence adapters and configuration.

pub mod config;
pub mod repository;

pub use config::{AppConfig, ConfigError, StoreConfig};
pub use repository::{
    InMemoryProductRepository, PostgresProductRepository, ProductRepository, RepositoryError,
};
