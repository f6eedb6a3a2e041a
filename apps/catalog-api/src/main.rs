//! Catalog API - REST server over a JSON items file

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_items::watcher;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let state = AppState::new(config);
    if state.repository.ensure_exists().await? {
        info!(
            "Initialized empty items file at {}",
            state.repository.path().display()
        );
    }
    info!("Serving items from {}", state.repository.path().display());

    // Out-of-band edits to the file must reach the stats cache
    let file_watcher = watcher::watch_data_file(state.repository.path(), state.stats.clone())?;

    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: stopping items file watcher");
            drop(file_watcher);
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
