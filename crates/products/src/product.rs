use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catalog_core::{DomainError, DomainResult, Entity};

use crate::price::Price;

/// Storage-assigned product identifier.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(Self)
            .map_err(|e| DomainError::invalid_id(format!("ProductId: {e}")))
    }
}

/// A persisted catalog row.
///
/// `Product::default()` is the zero-valued product (`id = 0`, empty name, price
/// `0.00`) reported by stats on an empty table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Validated name/price pair, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    name: String,
    price: Price,
}

impl ProductDraft {
    /// Validate client input. A missing price defaults to `0.00`.
    pub fn new(name: impl Into<String>, price: Option<Decimal>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name must not be empty"));
        }

        let price = match price {
            Some(amount) => Price::new(amount)?,
            None => Price::ZERO,
        };

        Ok(Self { name, price })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    /// Attach an identifier, producing the full record.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
        }
    }
}

/// Cheapest and most expensive product at query time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductStats {
    pub cheapest: Product,
    pub most_expensive: Product,
}
