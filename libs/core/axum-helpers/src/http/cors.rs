use axum::http::{HeaderValue, Method, header};
use core_config::env_or_default;
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

/// Origin of the local browser UI during development.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Creates a CORS layer for the catalog API.
///
/// Returns a `CorsLayer` with:
/// - The given allowed origins
/// - GET, POST, OPTIONS
/// - Content-Type and Accept headers
/// - 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Parses a comma-separated origin list, skipping blank entries.
pub fn parse_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    Ok(origins)
}

/// Builds the CORS layer from `CORS_ALLOWED_ORIGIN`
/// (comma-separated, defaults to [`DEFAULT_ALLOWED_ORIGIN`]).
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let raw = env_or_default("CORS_ALLOWED_ORIGIN", DEFAULT_ALLOWED_ORIGIN);
    let origins = parse_origins(&raw)?;
    info!("CORS configured with allowed origins: {}", raw);
    Ok(create_cors_layer(origins))
}
