//! API routes module

pub mod health;
pub mod items;
pub mod stats;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/items", items::router(state))
        .nest("/stats", stats::router(state))
        .merge(health::router(state.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use crate::openapi::ApiDoc;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use core_config::{app_info, server::ServerConfig};
    use domain_items::ItemsConfig;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn state_for(dir: &tempfile::TempDir) -> AppState {
        AppState::new(Config {
            app: app_info!(),
            server: ServerConfig::default(),
            items: ItemsConfig::new(dir.path().join("items.json")),
            environment: Environment::Development,
        })
    }

    async fn app(state: &AppState) -> Router {
        axum_helpers::create_router::<ApiDoc>(routes(state))
            .await
            .unwrap()
            .merge(axum_helpers::health_router(state.config.app))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_list_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(&dir);
        state.repository.ensure_exists().await.unwrap();
        let app = app(&state).await;

        let create = Request::builder()
            .method("POST")
            .uri("/api/items")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "name": "Wireless Mouse", "category": "Electronics", "price": 49.99 })
                    .to_string(),
            ))
            .unwrap();
        let (status, created) = send(app.clone(), create).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["id"], 1);

        let (status, page) = send(app.clone(), get("/api/items?q=mouse")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(page["total"], 1);
        assert_eq!(page["items"][0]["name"], "Wireless Mouse");

        let (status, stats) = send(app, get("/api/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats, json!({ "total": 1, "averagePrice": 49.99 }));
    }

    #[tokio::test]
    async fn test_ready_reflects_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(&dir);
        let app = app(&state).await;

        let (status, body) = send(app.clone(), get("/api/ready")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["data_file"], "disconnected");

        state.repository.ensure_exists().await.unwrap();
        let (status, body) = send(app.clone(), get("/api/ready")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");

        let (status, body) = send(app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_unknown_route_and_openapi() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(&dir);
        let app = app(&state).await;

        let (status, body) = send(app.clone(), get("/api/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].is_string());

        let (status, doc) = send(app, get("/api-docs/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/api/items"].is_object());
        assert!(doc["paths"]["/api/items/{id}"].is_object());
        assert!(doc["paths"]["/api/stats"].is_object());
    }
}
