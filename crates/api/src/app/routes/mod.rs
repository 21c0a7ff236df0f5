use axum::{
    routing::{get, post},
    Router,
};

use crate::context::AppState;

pub mod products;
pub mod system;

/// Router for the product endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list_products))
        .route("/products/stats", get(products::product_stats))
        .route("/products/search", get(products::search_products))
        .route("/product", post(products::create_product))
        .route(
            "/product/:id",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
}
