//! Items API routes

use axum::Router;
use domain_items::handlers;

use crate::state::AppState;

/// Create items router
pub fn router(state: &AppState) -> Router {
    handlers::router(state.items.clone())
}
