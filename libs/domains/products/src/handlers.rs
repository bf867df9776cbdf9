//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{post, put},
};
use axum_helpers::{
    IdPath, JsonBody, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};
use crate::repository::ProductRepository;
use crate::service::ProductService;

pub const UPDATED_MESSAGE: &str = "Product updated successfully";
pub const DELETED_MESSAGE: &str = "Product deleted successfully";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        create_product,
        get_product,
        update_product,
        delete_product,
        apply_discount_or_tax,
    ),
    components(
        schemas(Product, ProductInput),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", post(create_product))
        .route(
            "/{id}",
            put(update_product).get(get_product).delete(delete_product),
        )
        .route("/{id}/discount-or-tax", put(apply_discount_or_tax))
        .with_state(shared_service)
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<ProductInput>,
) -> ProductResult<impl IntoResponse> {
    tracing::info!("Creating product");

    let product = service
        .create(Some(input))
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Failed to create product"))?;

    tracing::info!(product_id = product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    tracing::info!(product_id = id, "Fetching product");

    let product = service
        .get_by_id(id)
        .await
        .inspect_err(|e| tracing::warn!(product_id = id, error = %e, "Failed to fetch product"))?;

    Ok(Json(product))
}

/// Update a product
///
/// Any failure, an unknown id included, is reported as 500.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated successfully", body = String, content_type = "text/plain"),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<ProductInput>,
) -> ProductResult<&'static str> {
    tracing::info!(product_id = id, "Updating product");

    service
        .update(id, input)
        .await
        .map_err(ProductError::into_service_failure)
        .inspect_err(|e| tracing::error!(product_id = id, error = %e, "Failed to update product"))?;

    tracing::info!(product_id = id, "Product updated");
    Ok(UPDATED_MESSAGE)
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = String, content_type = "text/plain"),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<&'static str> {
    tracing::info!(product_id = id, "Deleting product");

    let deleted = service
        .delete_by_id(id)
        .await
        .inspect_err(|e| tracing::error!(product_id = id, error = %e, "Failed to delete product"))?;

    if !deleted {
        tracing::warn!(product_id = id, "Product to delete was not found");
        return Err(ProductError::NotFound(id));
    }

    tracing::info!(product_id = id, "Product deleted");
    Ok(DELETED_MESSAGE)
}

/// Apply a discount or a tax rate to a product's price
///
/// A positive `discount_percentage` takes precedence over `tax_rate`. Any
/// failure, an unknown id included, is reported as 500.
#[utoipa::path(
    put,
    path = "/{id}/discount-or-tax",
    tag = "Products",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Adjusted product", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn apply_discount_or_tax<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<ProductInput>,
) -> ProductResult<Json<Product>> {
    tracing::info!(product_id = id, "Applying discount or tax");

    let product = service
        .apply_discount_or_tax(id, input)
        .await
        .map_err(ProductError::into_service_failure)
        .inspect_err(|e| {
            tracing::error!(product_id = id, error = %e, "Failed to apply discount or tax")
        })?;

    tracing::info!(product_id = id, price = product.price, "Discount or tax applied");
    Ok(Json(product))
}
