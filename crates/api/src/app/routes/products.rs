use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde_json::json;

use catalog_products::{Product, ProductId, ProductStats};

use crate::app::dto::{ListParams, Page, ProductRequest, SearchParams};
use crate::app::errors::{ApiError, INVALID_PAYLOAD, INVALID_PRODUCT_ID, INVALID_QUERY};
use crate::context::AppState;

fn parse_id(raw: &str) -> Result<ProductId, ApiError> {
    raw.parse::<ProductId>()
        .map_err(|_| ApiError::bad_request(INVALID_PRODUCT_ID))
}

fn body(payload: Result<Json<ProductRequest>, JsonRejection>) -> Result<ProductRequest, ApiError> {
    payload
        .map(|Json(req)| req)
        .map_err(|e| {
            tracing::debug!(error = %e, "rejected product payload");
            ApiError::bad_request(INVALID_PAYLOAD)
        })
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    let product = state.products().fetch_by_id(id).await?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let draft = body(payload)?.into_draft()?;
    let product = state.products().create(draft).await?;
    tracing::info!(product_id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Overwrites name and price. A missing row is not an error: the response echoes
/// the path id with the new values either way.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    let product = body(payload)?.into_draft()?.into_product(id);

    let affected = state.products().update(&product).await?;
    if affected == 0 {
        tracing::debug!(product_id = %id, "update matched no rows");
    }

    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_id(&id)?;
    let affected = state.products().delete(id).await?;
    if affected == 0 {
        tracing::debug!(product_id = %id, "delete matched no rows");
    }

    Ok(Json(json!({ "result": "success" })))
}

pub async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(params) = params.map_err(|_| ApiError::bad_request(INVALID_QUERY))?;
    let page = Page::from_params(&params)?;
    let products = state.products().list(page.offset, page.limit).await?;
    Ok(Json(products))
}

pub async fn product_stats(State(state): State<AppState>) -> Result<Json<ProductStats>, ApiError> {
    Ok(Json(state.products().stats().await?))
}

pub async fn search_products(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(params) = params.map_err(|_| ApiError::bad_request(INVALID_QUERY))?;
    let products = state.products().search_by_name(&params.name).await?;
    Ok(Json(products))
}
