//! Readiness check for the items data file.

use axum::{
    Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};
use domain_items::ItemRepository;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(state)
}

/// Ready once the data file can be read and parsed.
async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "data_file",
        Box::pin(async {
            state
                .repository
                .read_all()
                .await
                .map(|_| ())
                .map_err(|e| format!("Items file unreadable: {}", e))
        }),
    )];

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
