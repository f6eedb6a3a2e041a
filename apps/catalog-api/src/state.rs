//! Application state management

use domain_items::{ItemService, JsonFileItemRepository, StatsService};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repository: JsonFileItemRepository,
    pub items: ItemService<JsonFileItemRepository>,
    pub stats: StatsService<JsonFileItemRepository>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let repository = JsonFileItemRepository::new(config.items.data_path.clone());
        Self {
            items: ItemService::new(repository.clone()),
            stats: StatsService::new(repository.clone()),
            repository,
            config,
        }
    }
}
