use std::sync::Arc;

use catalog_infra::{Config, PostgresProductRepository, RepositoryResult, StoreKind, db};

use crate::context::AppState;

/// Open the configured product store and wrap it in the application context.
///
/// For Postgres this connects the pool and makes sure the `products` table exists.
pub async fn build_state(config: &Config) -> RepositoryResult<AppState> {
    match config.store {
        StoreKind::InMemory => {
            tracing::warn!("CATALOG_STORE=memory; products will not survive a restart");
            Ok(AppState::in_memory())
        }
        StoreKind::Postgres => {
            let pool = db::connect(&config.database).await?;
            db::ensure_schema(&pool).await?;
            tracing::info!("connected to postgres product store");
            Ok(AppState::new(Arc::new(PostgresProductRepository::new(pool))))
        }
    }
}
