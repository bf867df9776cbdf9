//! JSON extractor with validation through the `validator` crate.

use super::json_body::read_json;
use crate::errors::AppError;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has passed `Validate::validate`.
///
/// Parsing is shared with [`JsonBody`](super::JsonBody). On top of its
/// rejections, field validation failures are a 400 summarized as
/// `"Validation error: a; b"`.
///
/// The `Content-Type` header is not enforced.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateProduct {
///     #[validate(required(message = "Product name is required"))]
///     name: Option<String>,
/// }
///
/// async fn create(ValidatedJson(input): ValidatedJson<CreateProduct>) -> StatusCode {
///     StatusCode::CREATED
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let data: T = read_json(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
