//! Item Service - Business logic layer

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, ItemPage, ItemQuery};
use crate::query;
use crate::repository::ItemRepository;

/// Item service providing listing, lookup and creation.
///
/// Creation is a read-modify-write of the whole collection; `write_lock`
/// serializes those cycles so concurrent requests cannot drop each other's
/// items. Reads never take the lock.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
    write_lock: Arc<Mutex<()>>,
}

impl<R: ItemRepository> ItemService<R> {
    /// Create a new ItemService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// List items matching the query, one page at a time
    #[instrument(skip(self))]
    pub async fn list_items(&self, query: ItemQuery) -> ItemResult<ItemPage> {
        let collection = self.repository.read_all().await?;
        Ok(query::list(collection, query.search(), query.pagination()))
    }

    /// Get an item by ID
    #[instrument(skip(self))]
    pub async fn get_item(&self, id: u64) -> ItemResult<Item> {
        let collection = self.repository.read_all().await?;
        query::find(&collection, id)
            .cloned()
            .ok_or(ItemError::NotFound(id))
    }

    /// Validate, assign an id, append and persist a new item
    #[instrument(skip(self, input))]
    pub async fn create_item(&self, input: CreateItem) -> ItemResult<Item> {
        if let Some(field) = input.first_invalid_field() {
            return Err(ItemError::invalid_payload(field));
        }
        let new_item = input
            .into_new_item()
            .ok_or_else(|| ItemError::Internal("validated item lost a field".to_string()))?;

        let _guard = self.write_lock.lock().await;

        let mut collection = self.repository.read_all().await?;
        let id = next_id(&collection)?;
        let item = new_item.with_id(id);
        collection.push(item.clone());
        self.repository.write_all(&collection).await?;

        info!(item_id = item.id, item_name = %item.name, "Created item");
        Ok(item)
    }
}

/// Next id in the monotonic sequence: one past the largest id stored.
fn next_id(collection: &[Item]) -> ItemResult<u64> {
    collection
        .iter()
        .map(|item| item.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| ItemError::Internal("item id space exhausted".to_string()))
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}
