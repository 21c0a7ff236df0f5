//! Product catalog domain model.
//!
//! Plain data + validation rules for the single `products` table; no IO, no HTTP,
//! no storage.

pub mod price;
pub mod product;

pub use price::Price;
pub use product::{Product, ProductDraft, ProductId, ProductStats};
