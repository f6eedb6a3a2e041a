//! Location of the items document.

use core_config::{ConfigError, FromEnv, env_or_default};
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "data/items.json";

/// Items storage configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemsConfig {
    /// JSON document holding the whole catalog, relative to the working
    /// directory unless absolute
    pub data_path: PathBuf,
}

impl ItemsConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
        }
    }
}

impl Default for ItemsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}

impl FromEnv for ItemsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let data_path = env_or_default("ITEMS_DATA_PATH", DEFAULT_DATA_PATH);
        if data_path.trim().is_empty() {
            return Err(ConfigError::ParseError {
                key: "ITEMS_DATA_PATH".to_string(),
                details: "must not be empty".to_string(),
            });
        }

        Ok(Self::new(data_path))
    }
}
