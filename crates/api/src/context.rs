use std::sync::Arc;

use catalog_infra::{InMemoryProductRepository, ProductRepository};

/// Application context shared by every request handler.
///
/// Owns the storage handle; handlers reach storage only through the
/// `ProductRepository` operations. Cloning is cheap (one `Arc` bump).
#[derive(Clone)]
pub struct AppState {
    products: Arc<dyn ProductRepository>,
}

impl AppState {
    pub fn new(products: Arc<dyn ProductRepository>) -> Self {
        Self { products }
    }

    /// State backed by a fresh, empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryProductRepository::new()))
    }

    pub fn products(&self) -> &dyn ProductRepository {
        self.products.as_ref()
    }
}

impl core::fmt::Debug for AppState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
