//! JSON extractor that reports every rejection through `AppError`.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Json, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

/// JSON body without field validation.
///
/// Rejections match [`ValidatedJson`](super::ValidatedJson) minus the
/// validation step:
/// - empty body: 400 `"Request body is empty"`
/// - type mismatch: 400 `"Data type mismatch: ..."`
/// - malformed JSON: 400 `"Malformed JSON: ..."`
/// - body read failures keep their own status (413 over the body limit)
///
/// The `Content-Type` header is not enforced.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        read_json(req, state).await.map(JsonBody)
    }
}

pub(crate) async fn read_json<T, S>(req: Request, state: &S) -> Result<T, AppError>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    let bytes = Bytes::from_request(req, state).await?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::InvalidJson("Request body is empty".to_string()));
    }

    let Json(data) = Json::<T>::from_bytes(&bytes).map_err(|rejection| match rejection {
        JsonRejection::JsonDataError(e) => {
            AppError::InvalidJson(format!("Data type mismatch: {}", e.body_text()))
        }
        JsonRejection::JsonSyntaxError(e) => {
            AppError::InvalidJson(format!("Malformed JSON: {}", e.body_text()))
        }
        other => AppError::InvalidJson(other.body_text()),
    })?;

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorResponse;
    use axum::{
        Router, body::Body, extract::DefaultBodyLimit, http::Request, http::StatusCode,
        routing::put,
    };
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        title: Option<String>,
        count: Option<i32>,
    }

    async fn accept(JsonBody(payload): JsonBody<Payload>) -> String {
        format!(
            "{}:{}",
            payload.title.unwrap_or_default(),
            payload.count.unwrap_or_default()
        )
    }

    async fn put_body(app: Router, body: &'static str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri("/")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    fn app() -> Router {
        Router::new().route("/", put(accept))
    }

    fn error_of(bytes: &[u8]) -> ErrorResponse {
        serde_json::from_slice(bytes).unwrap()
    }

    #[tokio::test]
    async fn test_partial_body_is_accepted_without_content_type() {
        let (status, body) = put_body(app(), r#"{"count":-3}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b":-3");
    }

    #[tokio::test]
    async fn test_type_mismatch_is_bad_request_envelope() {
        let (status, body) = put_body(app(), r#"{"title":"a","count":"abc"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error = error_of(&body);
        assert_eq!(error.error, "INVALID_JSON");
        assert!(error.message.starts_with("Data type mismatch"));
        assert!(error.message.contains("count"));
    }

    #[tokio::test]
    async fn test_empty_body_is_bad_request() {
        let (status, body) = put_body(app(), "  ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_of(&body).message, "Request body is empty");
    }

    #[tokio::test]
    async fn test_oversized_body_keeps_payload_too_large_status() {
        let app = app().layer(DefaultBodyLimit::max(8));
        let (status, body) = put_body(app, r#"{"title":"far too long for the limit"}"#).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(error_of(&body).error, "BAD_REQUEST");
    }
}
