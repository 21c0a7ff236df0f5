//! Connection pool and schema bootstrap for the `products` table.

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use tracing::instrument;

use crate::config::DatabaseConfig;
use crate::repository::{RepositoryError, RepositoryResult};

const CREATE_PRODUCTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id BIGSERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    price NUMERIC(10,2) NOT NULL DEFAULT 0.00
)
"#;

/// Translate configuration into driver connect options.
///
/// A full `DATABASE_URL` wins over the individual parts.
pub fn connect_options(config: &DatabaseConfig) -> RepositoryResult<PgConnectOptions> {
    if let Some(url) = &config.url {
        return url
            .parse::<PgConnectOptions>()
            .map_err(|e| RepositoryError::storage(format!("invalid database url: {e}")));
    }

    let ssl_mode = config
        .ssl_mode
        .parse::<PgSslMode>()
        .map_err(|e| RepositoryError::storage(format!("invalid sslmode: {e}")))?;

    Ok(PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.username)
        .password(&config.password)
        .database(&config.name)
        .ssl_mode(ssl_mode))
}

/// Open a connection pool for the configured database.
#[instrument(skip(config), fields(max_connections = config.max_connections), err)]
pub async fn connect(config: &DatabaseConfig) -> RepositoryResult<PgPool> {
    let options = connect_options(config)?;
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .map_err(|e| RepositoryError::storage(format!("failed to connect to database: {e}")))
}

/// Create the `products` table if it does not exist yet.
#[instrument(skip(pool), err)]
pub async fn ensure_schema(pool: &PgPool) -> RepositoryResult<()> {
    sqlx::query(CREATE_PRODUCTS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| RepositoryError::storage(format!("failed to create products table: {e}")))?;
    Ok(())
}

/// Remove every row and restart the id sequence at 1 (test harnesses).
#[instrument(skip(pool), err)]
pub async fn reset(pool: &PgPool) -> RepositoryResult<()> {
    sqlx::query("TRUNCATE products RESTART IDENTITY")
        .execute(pool)
        .await
        .map_err(|e| RepositoryError::storage(format!("failed to reset products table: {e}")))?;
    Ok(())
}
