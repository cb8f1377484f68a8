//! Request entry points.
//!
//! [`TabGrouper`] wires the provider, validator and applier together for
//! each request and folds every outcome into a [`GroupingResponse`].

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use tabwise_protocols::error::GroupingError;
use tabwise_protocols::provider::GroupingProvider;
use tabwise_protocols::store::{ConfigStore, TabStore};
use tabwise_protocols::types::{ProviderKind, TabId, TabMetadata};

use crate::applier::GroupingApplier;
use crate::factory::ProviderFactory;
use crate::response::GroupingResponse;
use crate::retry::{with_retry, RetryPolicy};
use crate::validator::validate;

/// Retry schedules for the two retried call sites.
#[derive(Debug, Clone)]
pub struct GroupingSettings {
    pub provider_retry: RetryPolicy,
    pub group_retry: RetryPolicy,
}

impl GroupingSettings {
    pub fn new(provider_retry: RetryPolicy, group_retry: RetryPolicy) -> Self {
        Self {
            provider_retry,
            group_retry,
        }
    }
}

impl Default for GroupingSettings {
    fn default() -> Self {
        Self::new(RetryPolicy::provider_default(), RetryPolicy::group_default())
    }
}

pub struct TabGrouper {
    tabs: Arc<dyn TabStore>,
    configs: Arc<dyn ConfigStore>,
    factory: Arc<dyn ProviderFactory>,
    settings: GroupingSettings,
    /// Held for the duration of any request that touches tab state.
    in_flight: Mutex<()>,
}

impl TabGrouper {
    pub fn new(
        tabs: Arc<dyn TabStore>,
        configs: Arc<dyn ConfigStore>,
        factory: Arc<dyn ProviderFactory>,
        settings: GroupingSettings,
    ) -> Self {
        Self {
            tabs,
            configs,
            factory,
            settings,
            in_flight: Mutex::new(()),
        }
    }

    /// Group all open tabs with the provider's own judgement.
    pub async fn auto_group(&self) -> GroupingResponse {
        self.run(None).await.into()
    }

    /// Group all open tabs following the user's instructions.
    pub async fn custom_group(&self, prompt: &str) -> GroupingResponse {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return GroupingResponse::from_error(&GroupingError::EmptyPrompt);
        }
        self.run(Some(prompt)).await.into()
    }

    /// Check that the configured provider accepts its credentials.
    pub async fn test_connection(&self) -> GroupingResponse {
        self.check_connection().await.into()
    }

    /// Remove every open tab from its group.
    pub async fn ungroup_all(&self) -> GroupingResponse {
        self.ungroup().await.into()
    }

    fn acquire(&self) -> Result<MutexGuard<'_, ()>, GroupingError> {
        self.in_flight.try_lock().map_err(|_| {
            warn!("Rejecting request, another one is in progress");
            GroupingError::Busy
        })
    }

    async fn run(&self, prompt: Option<&str>) -> Result<GroupingResponse, GroupingError> {
        let _guard = self.acquire()?;

        let tabs = self.tabs.list_tabs().await?;
        if tabs.is_empty() {
            return Err(GroupingError::NoTabs);
        }
        let metadata = TabMetadata::collect(&tabs);

        let (kind, provider) = self.load_provider().await?;
        info!("Grouping {} tabs with {}", metadata.len(), kind);

        let raw = with_retry(&self.settings.provider_retry, "group_tabs", || {
            let provider = provider.clone();
            let metadata = metadata.clone();
            let prompt = prompt.map(str::to_string);
            async move { provider.group_tabs(&metadata, prompt.as_deref()).await }
        })
        .await?;

        let result = validate(&raw)?;
        debug!("Provider proposed {} groups", result.groups.len());

        let applier = GroupingApplier::new(self.tabs.clone(), self.settings.group_retry.clone());
        let outcome = applier.apply(&result).await?;
        Ok(GroupingResponse::from_outcome(&outcome))
    }

    async fn check_connection(&self) -> Result<GroupingResponse, GroupingError> {
        let (kind, provider) = self.load_provider().await?;
        provider.test_connection().await?;
        info!("Connection to {} verified", kind);
        Ok(GroupingResponse::connection_ok(kind))
    }

    async fn ungroup(&self) -> Result<GroupingResponse, GroupingError> {
        let _guard = self.acquire()?;

        let grouped: Vec<TabId> = self
            .tabs
            .list_tabs()
            .await?
            .into_iter()
            .filter(|t| t.is_grouped())
            .map(|t| t.id)
            .collect();

        if !grouped.is_empty() {
            self.tabs.ungroup(&grouped).await?;
            info!("Ungrouped {} tabs", grouped.len());
        }
        Ok(GroupingResponse::ungrouped(grouped.len()))
    }

    /// Resolve the configured provider, failing fast when it is unusable.
    async fn load_provider(
        &self,
    ) -> Result<(ProviderKind, Arc<dyn GroupingProvider>), GroupingError> {
        let config = self
            .configs
            .get_config()
            .await
            .map_err(|e| GroupingError::Configuration(e.to_string()))?;

        if !config.configured {
            return Err(GroupingError::NoConfig);
        }
        let credentials = config
            .credentials
            .as_ref()
            .ok_or(GroupingError::MissingCredentials {
                provider: config.provider,
            })?;
        if credentials.kind() != config.provider {
            return Err(GroupingError::Configuration(format!(
                "provider is {} but stored credentials are for {}",
                config.provider,
                credentials.kind()
            )));
        }

        let provider = self.factory.create(config.provider, credentials)?;
        Ok((config.provider, provider))
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
