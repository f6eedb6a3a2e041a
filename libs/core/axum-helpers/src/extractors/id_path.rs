//! Numeric id path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Extractor for non-negative integer path parameters.
///
/// Parses the single path segment as a `u64`, returning a 400 error
/// response with an `INVALID_ID` code if it is not a number.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_item(IdPath(id): IdPath) -> String {
///     format!("Item ID: {}", id)
/// }
///
/// let app = Router::new().route("/items/{id}", get(get_item));
/// ```
pub struct IdPath(pub u64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        raw.trim()
            .parse::<u64>()
            .map(IdPath)
            .map_err(|_| AppError::InvalidId(raw).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route("/{id}", get(|IdPath(id): IdPath| async move { id.to_string() }))
    }

    #[tokio::test]
    async fn test_numeric_id_is_extracted() {
        let response = app()
            .oneshot(Request::builder().uri("/42").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_rejected() {
        let response = app()
            .oneshot(Request::builder().uri("/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
