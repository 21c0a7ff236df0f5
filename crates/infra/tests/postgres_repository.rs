//! Postgres repository behavior against a live database.
//!
//! Runs only when `TEST_DATABASE_URL` is set; otherwise every test returns early.
//! All assertions live in one test because they share (and truncate) one table.

use rust_decimal::Decimal;
use sqlx::PgPool;

use catalog_infra::db;
use catalog_infra::{PostgresProductRepository, ProductRepository, RepositoryError};
use catalog_products::{ProductDraft, ProductId};

async fn pool() -> Option<PgPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = PgPool::connect(&url).await.expect("failed to connect to TEST_DATABASE_URL");
    db::ensure_schema(&pool).await.expect("failed to ensure schema");
    Some(pool)
}

async fn insert(pool: &PgPool, name: &str, price: f64) {
    sqlx::query("INSERT INTO products (name, price) VALUES ($1, $2::float8)")
        .bind(name)
        .bind(price)
        .execute(pool)
        .await
        .unwrap();
}

fn draft(name: &str, cents: i64) -> ProductDraft {
    ProductDraft::new(name, Some(Decimal::new(cents, 2))).unwrap()
}

#[tokio::test]
async fn postgres_repository_round_trip() {
    let Some(pool) = pool().await else {
        return;
    };
    let repo = PostgresProductRepository::new(pool.clone());

    // Empty table
    db::reset(&pool).await.unwrap();
    assert!(repo.list(0, 10).await.unwrap().is_empty());
    assert_eq!(repo.fetch_by_id(ProductId::new(11)).await.unwrap_err(), RepositoryError::NotFound);
    let stats = repo.stats().await.unwrap();
    assert_eq!(stats.cheapest.id, ProductId::new(0));
    assert_eq!(stats.most_expensive.name, "");

    // Create + fetch
    let created = repo.create(draft("test product", 1122)).await.unwrap();
    assert_eq!(created.id, ProductId::new(1));
    let fetched = repo.fetch_by_id(created.id).await.unwrap();
    assert_eq!(fetched.name, "test product");
    assert_eq!(fetched.price.amount(), Decimal::new(1122, 2));

    // Update
    let changed = draft("test product - updated name", 2233).into_product(created.id);
    assert_eq!(repo.update(&changed).await.unwrap(), 1);
    assert_eq!(repo.fetch_by_id(created.id).await.unwrap(), changed);
    let ghost = draft("ghost", 100).into_product(ProductId::new(999));
    assert_eq!(repo.update(&ghost).await.unwrap(), 0);

    // Delete
    assert_eq!(repo.delete(created.id).await.unwrap(), 1);
    assert_eq!(repo.fetch_by_id(created.id).await.unwrap_err(), RepositoryError::NotFound);
    assert_eq!(repo.delete(created.id).await.unwrap(), 0);

    // Stats
    db::reset(&pool).await.unwrap();
    insert(&pool, "Cheap Product", 20.0).await;
    insert(&pool, "Mid Product", 50.0).await;
    insert(&pool, "Expensive Product", 100.0).await;
    let stats = repo.stats().await.unwrap();
    assert_eq!(stats.cheapest.name, "Cheap Product");
    assert_eq!(stats.most_expensive.name, "Expensive Product");

    // Paging
    let page = repo.list(1, 1).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Mid Product");

    // Search
    db::reset(&pool).await.unwrap();
    insert(&pool, "T-shirt", 25.0).await;
    insert(&pool, "Shirt", 30.0).await;
    insert(&pool, "Jeans", 40.0).await;
    insert(&pool, "50% off", 10.0).await;
    let found = repo.search_by_name("shirt").await.unwrap();
    let names: Vec<_> = found.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["T-shirt", "Shirt"]);
    assert_eq!(repo.search_by_name("").await.unwrap().len(), 4);
    assert_eq!(repo.search_by_name("%").await.unwrap().len(), 1);

    db::reset(&pool).await.unwrap();
}
