use async_trait::async_trait;

use crate::error::ItemResult;
use crate::models::Item;

/// Repository trait for Item persistence
///
/// The whole collection is the unit of I/O: implementations load and store
/// every item at once, in insertion order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Load the entire collection
    async fn read_all(&self) -> ItemResult<Vec<Item>>;

    /// Replace the stored collection with `items`
    async fn write_all(&self, items: &[Item]) -> ItemResult<()>;
}
