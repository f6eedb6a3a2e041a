//! Item repository backed by a single pretty-printed JSON array on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::error::{ItemError, ItemResult};
use crate::models::Item;
use crate::repository::ItemRepository;

#[derive(Debug, Clone)]
pub struct JsonFileItemRepository {
    path: PathBuf,
}

impl JsonFileItemRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and an empty `[]` document when the file
    /// is missing. Returns `true` if a file was created.
    pub async fn ensure_exists(&self) -> ItemResult<bool> {
        if tokio::fs::try_exists(&self.path)
            .await
            .map_err(|e| self.read_error(e))?
        {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.write_error(e))?;
        }
        self.write_all(&[]).await?;
        info!(path = %self.path.display(), "Created empty items file");
        Ok(true)
    }

    fn read_error(&self, err: impl std::fmt::Display) -> ItemError {
        ItemError::StorageRead(format!("{}: {}", self.path.display(), err))
    }

    fn write_error(&self, err: impl std::fmt::Display) -> ItemError {
        ItemError::StorageWrite(format!("{}: {}", self.path.display(), err))
    }
}

#[async_trait]
impl ItemRepository for JsonFileItemRepository {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn read_all(&self) -> ItemResult<Vec<Item>> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|e| self.read_error(e))?;
        let items: Vec<Item> = serde_json::from_slice(&raw).map_err(|e| self.read_error(e))?;
        debug!(count = items.len(), "Loaded items");
        Ok(items)
    }

    #[instrument(skip(self, items), fields(path = %self.path.display(), count = items.len()))]
    async fn write_all(&self, items: &[Item]) -> ItemResult<()> {
        let body = serde_json::to_vec_pretty(items).map_err(|e| self.write_error(e))?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|e| self.write_error(e))?;
        debug!("Persisted items");
        Ok(())
    }
}
