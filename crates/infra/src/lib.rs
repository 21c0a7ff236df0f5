//! Infrastructure layer: product storage and configuration.

pub mod config;
pub mod db;
pub mod repository;

pub use config::{Config, ConfigError, StoreKind};
pub use repository::{
    InMemoryProductRepository, PostgresProductRepository, ProductRepository, RepositoryError,
    RepositoryResult,
};
