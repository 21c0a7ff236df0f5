//! Product storage abstraction and its implementations.

use std::sync::Arc;

use thiserror::Error;

use catalog_products::{Product, ProductDraft, ProductId, ProductStats};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryProductRepository;
pub use postgres::PostgresProductRepository;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No row matched the requested id.
    #[error("product not found")]
    NotFound,

    /// Connection failure, constraint violation or any other driver error.
    #[error("storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// The seven storage operations of the catalog.
///
/// Every call is a single auto-committed statement. `update` and `delete` report the
/// number of affected rows and never fail with `NotFound`; a zero count is success.
#[async_trait::async_trait]
pub trait ProductRepository: Send + Sync {
    async fn fetch_by_id(&self, id: ProductId) -> RepositoryResult<Product>;

    async fn create(&self, draft: ProductDraft) -> RepositoryResult<Product>;

    async fn update(&self, product: &Product) -> RepositoryResult<u64>;

    async fn delete(&self, id: ProductId) -> RepositoryResult<u64>;

    /// Products in id order, skipping `offset` rows and returning at most `limit`.
    async fn list(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<Product>>;

    /// Zero-valued products on an empty table; ties resolve to the lowest id.
    async fn stats(&self) -> RepositoryResult<ProductStats>;

    /// Case-insensitive substring match on `name`, in id order.
    async fn search_by_name(&self, substring: &str) -> RepositoryResult<Vec<Product>>;
}

#[async_trait::async_trait]
impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    async fn fetch_by_id(&self, id: ProductId) -> RepositoryResult<Product> {
        (**self).fetch_by_id(id).await
    }

    async fn create(&self, draft: ProductDraft) -> RepositoryResult<Product> {
        (**self).create(draft).await
    }

    async fn update(&self, product: &Product) -> RepositoryResult<u64> {
        (**self).update(product).await
    }

    async fn delete(&self, id: ProductId) -> RepositoryResult<u64> {
        (**self).delete(id).await
    }

    async fn list(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<Product>> {
        (**self).list(offset, limit).await
    }

    async fn stats(&self) -> RepositoryResult<ProductStats> {
        (**self).stats().await
    }

    async fn search_by_name(&self, substring: &str) -> RepositoryResult<Vec<Product>> {
        (**self).search_by_name(substring).await
    }
}
