use std::collections::BTreeMap;
use std::sync::RwLock;

use catalog_core::Entity;
use catalog_products::{Product, ProductDraft, ProductId, ProductStats};

use super::{ProductRepository, RepositoryError, RepositoryResult};

#[derive(Debug)]
struct Table {
    rows: BTreeMap<ProductId, Product>,
    last_id: i64,
}

/// In-memory product store for tests/dev.
///
/// Mirrors the Postgres semantics: ids start at 1 and are never reused, rows are
/// returned in id order, negative paging arguments are rejected.
#[derive(Debug)]
pub struct InMemoryProductRepository {
    inner: RwLock<Table>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Table {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }

    /// Insert a row as-is, bypassing draft validation (test fixtures).
    pub fn insert_raw(&self, name: &str, price: catalog_products::Price) -> RepositoryResult<Product> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        table.last_id += 1;
        let product = Product {
            id: ProductId::new(table.last_id),
            name: name.to_string(),
            price,
        };
        table.rows.insert(product.id(), product.clone());
        Ok(product)
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> RepositoryError {
    RepositoryError::storage("in-memory product table lock poisoned")
}

fn non_negative(value: i64, what: &str) -> RepositoryResult<usize> {
    usize::try_from(value).map_err(|_| RepositoryError::storage(format!("{what} must not be negative")))
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn fetch_by_id(&self, id: ProductId) -> RepositoryResult<Product> {
        let table = self.inner.read().map_err(|_| poisoned())?;
        table.rows.get(&id).cloned().ok_or(RepositoryError::NotFound)
    }

    async fn create(&self, draft: ProductDraft) -> RepositoryResult<Product> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        table.last_id += 1;
        let product = draft.into_product(ProductId::new(table.last_id));
        table.rows.insert(product.id(), product.clone());
        Ok(product)
    }

    async fn update(&self, product: &Product) -> RepositoryResult<u64> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        match table.rows.get_mut(&product.id()) {
            Some(row) => {
                row.name = product.name.clone();
                row.price = product.price;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: ProductId) -> RepositoryResult<u64> {
        let mut table = self.inner.write().map_err(|_| poisoned())?;
        Ok(table.rows.remove(&id).map_or(0, |_| 1))
    }

    async fn list(&self, offset: i64, limit: i64) -> RepositoryResult<Vec<Product>> {
        let offset = non_negative(offset, "OFFSET")?;
        let limit = non_negative(limit, "LIMIT")?;

        let table = self.inner.read().map_err(|_| poisoned())?;
        Ok(table.rows.values().skip(offset).take(limit).cloned().collect())
    }

    async fn stats(&self) -> RepositoryResult<ProductStats> {
        let table = self.inner.read().map_err(|_| poisoned())?;

        let mut rows = table.rows.values();
        let Some(first) = rows.next() else {
            return Ok(ProductStats::default());
        };

        let (cheapest, most_expensive) = rows.fold((first, first), |(lo, hi), p| {
            (
                if p.price < lo.price { p } else { lo },
                if p.price > hi.price { p } else { hi },
            )
        });

        Ok(ProductStats {
            cheapest: cheapest.clone(),
            most_expensive: most_expensive.clone(),
        })
    }

    async fn search_by_name(&self, substring: &str) -> RepositoryResult<Vec<Product>> {
        let needle = substring.to_lowercase();
        let table = self.inner.read().map_err(|_| poisoned())?;
        Ok(table
            .rows
            .values()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_products::Price;
    use rust_decimal::Decimal;

    fn draft(name: &str, cents: i64) -> ProductDraft {
        ProductDraft::new(name, Some(Decimal::new(cents, 2))).unwrap()
    }

    fn price(units: i64) -> Price {
        Price::from_storage(Decimal::new(units, 0))
    }

    #[tokio::test]
    async fn created_product_can_be_fetched() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(draft("test product", 1122)).await.unwrap();
        assert_eq!(created.id, ProductId::new(1));

        let fetched = repo.fetch_by_id(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn fetch_unknown_id_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let err = repo.fetch_by_id(ProductId::new(11)).await.unwrap_err();
        assert_eq!(err, RepositoryError::NotFound);
    }

    #[tokio::test]
    async fn update_overwrites_name_and_price() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(draft("old", 100)).await.unwrap();

        let changed = draft("new", 250).into_product(created.id);
        assert_eq!(repo.update(&changed).await.unwrap(), 1);
        assert_eq!(repo.fetch_by_id(created.id).await.unwrap(), changed);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_row_affect_nothing() {
        let repo = InMemoryProductRepository::new();
        let ghost = draft("ghost", 100).into_product(ProductId::new(99));
        assert_eq!(repo.update(&ghost).await.unwrap(), 0);
        assert_eq!(repo.delete(ProductId::new(99)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn deleted_product_is_not_found_and_id_is_not_reused() {
        let repo = InMemoryProductRepository::new();
        let created = repo.create(draft("gone", 100)).await.unwrap();
        assert_eq!(repo.delete(created.id).await.unwrap(), 1);
        assert_eq!(repo.fetch_by_id(created.id).await.unwrap_err(), RepositoryError::NotFound);

        let next = repo.create(draft("next", 100)).await.unwrap();
        assert_eq!(next.id, ProductId::new(2));
    }

    #[tokio::test]
    async fn list_pages_in_id_order() {
        let repo = InMemoryProductRepository::new();
        assert!(repo.list(0, 10).await.unwrap().is_empty());

        for i in 0..5 {
            repo.create(draft(&format!("Product {i}"), (i + 1) * 1000)).await.unwrap();
        }

        let page = repo.list(1, 2).await.unwrap();
        let names: Vec<_> = page.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Product 1", "Product 2"]);

        assert!(repo.list(10, 10).await.unwrap().is_empty());
        assert!(matches!(repo.list(-1, 10).await, Err(RepositoryError::Storage(_))));
    }

    #[tokio::test]
    async fn stats_pick_cheapest_and_most_expensive() {
        let repo = InMemoryProductRepository::new();
        assert_eq!(repo.stats().await.unwrap(), ProductStats::default());

        repo.insert_raw("Cheap Product", price(20)).unwrap();
        repo.insert_raw("Mid Product", price(50)).unwrap();
        repo.insert_raw("Expensive Product", price(100)).unwrap();
        repo.insert_raw("Also Cheap", price(20)).unwrap();

        let stats = repo.stats().await.unwrap();
        assert_eq!(stats.cheapest.name, "Cheap Product");
        assert_eq!(stats.most_expensive.name, "Expensive Product");
    }

    #[tokio::test]
    async fn search_is_case_insensitive_substring() {
        let repo = InMemoryProductRepository::new();
        repo.insert_raw("T-shirt", price(25)).unwrap();
        repo.insert_raw("Shirt", price(30)).unwrap();
        repo.insert_raw("Jeans", price(40)).unwrap();

        let found = repo.search_by_name("shirt").await.unwrap();
        let names: Vec<_> = found.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["T-shirt", "Shirt"]);

        assert_eq!(repo.search_by_name("").await.unwrap().len(), 3);
        assert!(repo.search_by_name("%").await.unwrap().is_empty());
    }
}
