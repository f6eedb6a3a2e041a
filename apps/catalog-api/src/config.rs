//! Configuration for Catalog API

use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use domain_items::ItemsConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub items: ItemsConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            server: ServerConfig::from_env()?,
            items: ItemsConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}
