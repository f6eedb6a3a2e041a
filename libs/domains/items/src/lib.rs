//! Items Domain
//!
//! Catalog items persisted as one JSON document, with search, pagination,
//! creation and cached aggregate statistics.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (/items, /stats)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌─────────────┐
//! │  Services   │ ◄── │   Watcher   │  ← file changes invalidate stats
//! └──────┬──────┘     └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + JSON file implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_items::{
//!     handlers, watcher, ItemService, JsonFileItemRepository, StatsService,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = JsonFileItemRepository::new("data/items.json");
//!
//! let items = ItemService::new(repository.clone());
//! let stats = StatsService::new(repository.clone());
//!
//! // Keep the guard alive for as long as the cache should track the file
//! let _guard = watcher::watch_data_file(repository.path(), stats.clone())?;
//!
//! let router = axum::Router::new()
//!     .nest("/items", handlers::router(items))
//!     .nest("/stats", handlers::stats_router(stats));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod json_file;
pub mod models;
pub mod query;
pub mod repository;
pub mod service;
pub mod stats;
pub mod watcher;

// Re-export commonly used types
pub use config::ItemsConfig;
pub use error::{ItemError, ItemResult};
pub use handlers::{ItemsApiDoc, StatsApiDoc};
pub use json_file::JsonFileItemRepository;
pub use models::{CreateItem, Item, ItemPage, ItemQuery, Stats};
pub use query::Pagination;
pub use repository::ItemRepository;
pub use service::ItemService;
pub use stats::StatsService;
pub use watcher::DataFileWatcher;
