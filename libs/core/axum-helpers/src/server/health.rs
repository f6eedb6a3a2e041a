use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::future::Future;
use std::pin::Pin;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// A boxed future for health checks with a string error
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Runs multiple health checks concurrently and returns aggregated results.
///
/// Responds 200 with `{"status": "ready", <name>: "connected", ...}` when
/// every check passes, otherwise 503 with the failing checks marked
/// `"disconnected"`.
///
/// # Example
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture)> = vec![
///     ("data_file", Box::pin(async { repo.read_all().await.map(|_| ()).map_err(|e| e.to_string()) })),
/// ];
/// run_health_checks(checks).await
/// ```
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let names: Vec<_> = checks.iter().map(|(name, _)| *name).collect();
    let futures: Vec<_> = checks.into_iter().map(|(_, check)| check).collect();
    let results = join_all(futures).await;

    let mut services = Map::new();
    let mut all_healthy = true;

    for (name, result) in names.into_iter().zip(results) {
        match result {
            Ok(_) => {
                services.insert(name.to_string(), json!("connected"));
            }
            Err(e) => {
                tracing::error!("Readiness check failed: {} error: {:?}", name, e);
                services.insert(name.to_string(), json!("disconnected"));
                all_healthy = false;
            }
        }
    }

    services.insert(
        "status".to_string(),
        json!(if all_healthy { "ready" } else { "not ready" }),
    );
    let response = Value::Object(services);

    if all_healthy {
        Ok((StatusCode::OK, Json(response)))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Health check endpoint handler.
///
/// Always 200 while the process is serving.
pub async fn health_handler(State(app): State<AppInfo>) -> Response {
    let response = HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Creates a router with the /health endpoint.
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_checks_passing_is_ready() {
        let checks: Vec<(&str, HealthCheckFuture)> = vec![
            ("data_file", Box::pin(async { Ok(()) })),
            ("stats", Box::pin(async { Ok(()) })),
        ];

        let (status, Json(body)) = run_health_checks(checks).await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["data_file"], "connected");
    }

    #[tokio::test]
    async fn test_failing_check_is_not_ready() {
        let checks: Vec<(&str, HealthCheckFuture)> = vec![
            ("data_file", Box::pin(async { Err("missing".to_string()) })),
        ];

        let (status, Json(body)) = run_health_checks(checks).await.unwrap_err();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "not ready");
        assert_eq!(body["data_file"], "disconnected");
    }
}
