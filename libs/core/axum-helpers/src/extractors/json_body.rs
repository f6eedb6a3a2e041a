//! JSON body extractor with structured rejections.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// JSON extractor whose rejection uses the shared error body.
///
/// Field-level validation stays with the domain service; this only
/// guarantees that a body which is not JSON (or has the wrong content
/// type) comes back as `{code, error, message}` like every other error.
///
/// # Example
/// ```ignore
/// use axum::routing::post;
/// use axum_helpers::extractors::JsonBody;
///
/// async fn create(JsonBody(payload): JsonBody<serde_json::Value>) -> String {
///     payload.to_string()
/// }
///
/// let app = axum::Router::new().route("/", post(create));
/// ```
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::JsonExtractorRejection(e).into_response())?;

        Ok(JsonBody(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorResponse;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/",
                post(|JsonBody(value): JsonBody<serde_json::Value>| async move { value.to_string() }),
            )
            .route(
                "/numbers",
                post(|JsonBody(values): JsonBody<Vec<u32>>| async move { values.len().to_string() }),
            )
    }

    async fn status_and_error(request: Request<Body>) -> (StatusCode, String) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        (status, body.error)
    }

    #[tokio::test]
    async fn test_invalid_json_returns_error_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "JSON_EXTRACTION");
        assert!(!body.message.is_empty());
    }

    #[tokio::test]
    async fn test_missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from("{}"))
            .unwrap();

        let (status, error) = status_and_error(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error, "JSON_EXTRACTION");
    }

    #[tokio::test]
    async fn test_wrong_json_shape_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/numbers")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"not": "a list"}"#))
            .unwrap();

        let (status, error) = status_and_error(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error, "JSON_EXTRACTION");
    }
}
