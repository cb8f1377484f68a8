//! Credential store implementations.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use tabwise_protocols::error::StoreError;
use tabwise_protocols::store::ConfigStore;
use tabwise_protocols::types::{Credentials, ProviderConfig, ProviderKind};

fn check_kind(provider: ProviderKind, credentials: &Credentials) -> Result<(), StoreError> {
    if credentials.kind() != provider {
        return Err(StoreError::InvalidRequest(format!(
            "{} credentials cannot be stored for provider {}",
            credentials.kind(),
            provider
        )));
    }
    Ok(())
}

/// In-memory credential store.
#[derive(Default)]
pub struct MemoryConfigStore {
    config: RwLock<ProviderConfig>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProviderConfig) -> Self {
        Self {
            config: RwLock::new(config),
        }
    }
}

#[async_trait]
impl ConfigStore for MemoryConfigStore {
    async fn get_config(&self) -> Result<ProviderConfig, StoreError> {
        Ok(self.config.read().clone())
    }

    async fn save_config(&self, config: &ProviderConfig) -> Result<(), StoreError> {
        *self.config.write() = config.clone();
        Ok(())
    }

    async fn save_credentials(
        &self,
        provider: ProviderKind,
        credentials: Credentials,
    ) -> Result<(), StoreError> {
        check_kind(provider, &credentials)?;
        *self.config.write() = ProviderConfig::with_credentials(credentials);
        Ok(())
    }

    async fn clear_credentials(&self) -> Result<(), StoreError> {
        let mut config = self.config.write();
        config.credentials = None;
        config.configured = false;
        Ok(())
    }
}

/// Credential store persisted as a TOML file.
///
/// A missing file reads as an unconfigured store.
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write(&self, config: &ProviderConfig) -> Result<(), StoreError> {
        let content =
            toml::to_string_pretty(config).map_err(|e| StoreError::Format(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, content).await?;
        debug!("Saved provider config to {:?}", self.path);
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn get_config(&self) -> Result<ProviderConfig, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ProviderConfig::default());
            }
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&content).map_err(|e| StoreError::Format(e.to_string()))
    }

    async fn save_config(&self, config: &ProviderConfig) -> Result<(), StoreError> {
        self.write(config).await
    }

    async fn save_credentials(
        &self,
        provider: ProviderKind,
        credentials: Credentials,
    ) -> Result<(), StoreError> {
        check_kind(provider, &credentials)?;
        self.write(&ProviderConfig::with_credentials(credentials)).await
    }

    async fn clear_credentials(&self) -> Result<(), StoreError> {
        let mut config = self.get_config().await?;
        config.credentials = None;
        config.configured = false;
        self.write(&config).await
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
