use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Product not found with ID: {0}")]
    NotFound(i64),

    #[error("{0}")]
    ServiceFailure(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// `ServiceFailure` with the message `"<context>: <cause>"`.
    pub fn failure(context: &str, cause: impl Display) -> Self {
        ProductError::ServiceFailure(format!("{}: {}", context, cause))
    }

    /// Wraps every error except `NotFound` as a `ServiceFailure` under `context`.
    pub fn with_context(self, context: &str) -> Self {
        match self {
            ProductError::NotFound(id) => ProductError::NotFound(id),
            other => ProductError::failure(context, other),
        }
    }

    /// Collapses every kind, `NotFound` included, into `ServiceFailure`.
    pub fn into_service_failure(self) -> Self {
        match self {
            ProductError::ServiceFailure(msg) => ProductError::ServiceFailure(msg),
            other => ProductError::ServiceFailure(other.to_string()),
        }
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::InvalidInput(msg) => AppError::BadRequest(msg),
            ProductError::NotFound(id) => {
                AppError::NotFound(ProductError::NotFound(id).to_string())
            }
            ProductError::ServiceFailure(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
