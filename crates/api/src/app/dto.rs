use rust_decimal::Decimal;
use serde::Deserialize;

use catalog_products::ProductDraft;

use crate::app::errors::{ApiError, INVALID_QUERY};

/// Page size used when `count` is absent.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 10;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /product` and `PUT /product/{id}`.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
}

impl ProductRequest {
    pub fn into_draft(self) -> Result<ProductDraft, ApiError> {
        Ok(ProductDraft::new(self.name, self.price)?)
    }
}

/// Raw `?count=&start=` parameters; parsed by [`Page::from_params`].
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub count: Option<String>,
    pub start: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub name: String,
}

// -------------------------
// Paging
// -------------------------

/// Effective `LIMIT`/`OFFSET` after defaulting and clamping.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl Page {
    /// `count` is clamped to `[1, MAX_PAGE_SIZE]`, `start` to `>= 0`.
    /// Values that are not integers are rejected.
    pub fn from_params(params: &ListParams) -> Result<Self, ApiError> {
        let limit = parse_param(params.count.as_deref())?
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let offset = parse_param(params.start.as_deref())?.unwrap_or(0).max(0);

        Ok(Self { offset, limit })
    }
}

fn parse_param(raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ApiError::bad_request(INVALID_QUERY)),
    }
}
