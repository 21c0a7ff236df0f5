use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use catalog_core::DomainError;
use catalog_infra::RepositoryError;

pub const INVALID_PRODUCT_ID: &str = "Invalid product ID";
pub const INVALID_PAYLOAD: &str = "Invalid request payload";
pub const INVALID_QUERY: &str = "Invalid query parameter";
pub const PRODUCT_NOT_FOUND: &str = "Product not found";

/// Error returned by handlers; rendered as `{"error": "<message>"}`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{}", PRODUCT_NOT_FOUND)]
    NotFound,

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ApiError::NotFound,
            RepositoryError::Storage(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => ApiError::BadRequest(msg),
            DomainError::InvalidId(_) => ApiError::bad_request(INVALID_PRODUCT_ID),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(msg) = &self {
            tracing::error!(error = %msg, "storage operation failed");
        }
        json_error(self.status(), self.to_string())
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, axum::Json(json!({ "error": message.into() }))).into_response()
}
