//! Cached aggregate statistics over the catalog.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::error::ItemResult;
use crate::models::Stats;
use crate::repository::ItemRepository;

#[derive(Debug, Default)]
struct StatsCache {
    value: Option<Stats>,
    /// Bumped on every invalidation. A recompute that started under an older
    /// generation must not store its result.
    generation: u64,
}

/// Serves `Stats` from memory, recomputing from the repository only after
/// the cache has been invalidated.
pub struct StatsService<R: ItemRepository> {
    repository: Arc<R>,
    cache: Arc<RwLock<StatsCache>>,
}

impl<R: ItemRepository> StatsService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            cache: Arc::new(RwLock::new(StatsCache::default())),
        }
    }

    /// Current statistics, computed at most once per cache generation.
    #[instrument(skip(self))]
    pub async fn get_stats(&self) -> ItemResult<Stats> {
        let generation = {
            let cache = self.cache.read().await;
            if let Some(stats) = &cache.value {
                debug!("stats served from cache");
                return Ok(stats.clone());
            }
            cache.generation
        };

        let collection = self.repository.read_all().await?;
        let stats = Stats::from_items(&collection);

        let mut cache = self.cache.write().await;
        if cache.generation == generation {
            cache.value = Some(stats.clone());
        } else {
            debug!("stats cache invalidated during recompute, not storing");
        }

        Ok(stats)
    }

    /// Drops the cached value; the next `get_stats` recomputes.
    pub async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        cache.value = None;
        cache.generation = cache.generation.wrapping_add(1);
    }

    pub async fn is_cached(&self) -> bool {
        self.cache.read().await.value.is_some()
    }
}

impl<R: ItemRepository> Clone for StatsService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: Arc::clone(&self.cache),
        }
    }
}
