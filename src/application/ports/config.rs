//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for the provider and relay configuration source
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Read the stored provider and relay sections.
    ///
    /// A missing file is not an error; it yields a config with every
    /// section unset so it can sit under env and CLI layers.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Persist both sections, creating parent directories as needed.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the backing file
    fn path(&self) -> PathBuf;

    fn exists(&self) -> bool;

    /// Write a config file with relay defaults and an empty provider section.
    /// Fails if file already exists.
    async fn init(&self) -> Result<(), ConfigError>;
}
