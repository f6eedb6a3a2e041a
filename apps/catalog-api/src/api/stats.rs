//! Stats API routes

use axum::Router;
use domain_items::handlers;

use crate::state::AppState;

/// Create stats router
pub fn router(state: &AppState) -> Router {
    handlers::stats_router(state.stats.clone())
}
