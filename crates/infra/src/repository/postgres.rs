//! Postgres-backed product repository.
//!
//! Every operation is one parameterized statement against the `products` table
//! (see [`crate::db::ensure_schema`]), auto-committed by the pool connection.
//!
//! ## Error Mapping
//!
//! | SQLx Error | RepositoryError |
//! |------------|-----------------|
//! | `RowNotFound` | `NotFound` |
//! | `Database` (any SQLSTATE) | `Storage` with code + message |
//! | `PoolTimedOut` / `PoolClosed` / IO / TLS | `Storage` |

use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use catalog_products::{Price, Product, ProductDraft, ProductId, ProductStats};

use super::{ProductRepository, RepositoryError, RepositoryResult};

/// Thread safety comes from the sqlx pool; clones share the same connections.
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn extreme(&self, operation: &str, sql: &str) -> RepositoryResult<Product> {
        let row = sqlx::query(sql)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(operation, e))?;

        match row {
            Some(row) => product_from_row(&row).map_err(|e| map_sqlx_error(operation, e)),
            None => Ok(Product::default()),
        }
    }
}

#[async_trait::async_trait]
impl ProductRepository for PostgresProductRepository {
    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn fetch_by_id(&self, id: ProductId) -> RepositoryResult<Product> {
        let row = sqlx::query("SELECT id, name, price FROM products WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("fetch_product", e))?
            .ok_or(RepositoryError::NotFound)?;

        product_from_row(&row).map_err(|e| map_sqlx_error("fetch_product", e))
    }

    #[instrument(skip(self, draft), fields(name = draft.name()), err)]
    async fn create(&self, draft: ProductDraft) -> RepositoryResult<Product> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING id",
        )
        .bind(draft.name())
        .bind(Decimal::from(draft.price()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_product", e))?;

        Ok(draft.into_product(ProductId::new(id)))
    }

    #[instrument(skip(self, product), fields(product_id = %product.id), err)]
    async fn update(&self, product: &Product) -> RepositoryResult<u64> {
        let result = sqlx::query("UPDATE products SET name = $1, price = $2 WHERE id = $3")
            .bind(&product.name)
            .bind(product.price.amount())
            .bind(product.id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("update_product", e))?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete(&self, id: ProductId) -> RepositoryResult<u64> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_product", e))?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self), err)]
    async fn list(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<Product>> {
        let rows = sqlx::query(
            "SELECT id, name, price FROM products ORDER BY id LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_products", e))?;

        rows.iter()
            .map(product_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("list_products", e))
    }

    #[instrument(skip(self), err)]
    async fn stats(&self) -> RepositoryResult<ProductStats> {
        let cheapest = self
            .extreme(
                "cheapest_product",
                "SELECT id, name, price FROM products ORDER BY price ASC, id ASC LIMIT 1",
            )
            .await?;
        let most_expensive = self
            .extreme(
                "most_expensive_product",
                "SELECT id, name, price FROM products ORDER BY price DESC, id ASC LIMIT 1",
            )
            .await?;

        Ok(ProductStats {
            cheapest,
            most_expensive,
        })
    }

    #[instrument(skip(self), err)]
    async fn search_by_name(&self, substring: &str) -> RepositoryResult<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, price
            FROM products
            WHERE name ILIKE '%' || $1 || '%'
            ORDER BY id
            "#,
        )
        .bind(escape_like(substring))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("search_products", e))?;

        rows.iter()
            .map(product_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("search_products", e))
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: ProductId::new(row.try_get("id")?),
        name: row.try_get("name")?,
        price: Price::from_storage(row.try_get::<Decimal, _>("price")?),
    })
}

/// Escape LIKE metacharacters so the pattern matches `substring` literally.
///
/// Backslash is the default LIKE escape character in Postgres.
fn escape_like(substring: &str) -> String {
    let mut out = String::with_capacity(substring.len());
    for c in substring.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) => RepositoryError::storage(format!(
                "database error in {operation} ({code}): {}",
                db_err.message()
            )),
            None => RepositoryError::storage(format!(
                "database error in {operation}: {}",
                db_err.message()
            )),
        },
        sqlx::Error::PoolClosed => {
            RepositoryError::storage(format!("connection pool closed in {operation}"))
        }
        _ => RepositoryError::storage(format!("sqlx error in {operation}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_quotes_metacharacters() {
        assert_eq!(escape_like("shirt"), "shirt");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like(""), "");
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert_eq!(
            map_sqlx_error("fetch_product", sqlx::Error::RowNotFound),
            RepositoryError::NotFound
        );
    }

    #[test]
    fn pool_errors_map_to_storage() {
        match map_sqlx_error("list_products", sqlx::Error::PoolTimedOut) {
            RepositoryError::Storage(msg) => assert!(msg.contains("list_products")),
            other => panic!("Expected Storage error, got {other:?}"),
        }
    }
}
