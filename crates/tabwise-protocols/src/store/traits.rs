//! Tab store and credential store traits.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{BrowserTab, Credentials, GroupColor, GroupId, ProviderConfig, ProviderKind, TabGroupInfo, TabId};

/// Host that owns the real tab and tab-group state.
#[async_trait]
pub trait TabStore: Send + Sync {
    /// Enumerate every open tab.
    async fn list_tabs(&self) -> Result<Vec<BrowserTab>, StoreError>;

    /// Enumerate existing tab groups. Hosts without a group query keep the default.
    async fn list_groups(&self) -> Result<Vec<TabGroupInfo>, StoreError> {
        Err(StoreError::Unsupported("list_groups".to_string()))
    }

    /// Group `tab_ids` under a new group. Fails if `tab_ids` is empty.
    async fn create_group(
        &self,
        name: &str,
        color: GroupColor,
        tab_ids: &[TabId],
    ) -> Result<GroupId, StoreError>;

    /// Remove `tab_ids` from whatever group they belong to.
    async fn ungroup(&self, tab_ids: &[TabId]) -> Result<(), StoreError>;
}

/// Persistence for provider selection and credentials.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn get_config(&self) -> Result<ProviderConfig, StoreError>;

    async fn save_config(&self, config: &ProviderConfig) -> Result<(), StoreError>;

    /// Store `credentials` for `provider`, select it and mark it configured.
    async fn save_credentials(
        &self,
        provider: ProviderKind,
        credentials: Credentials,
    ) -> Result<(), StoreError>;

    /// Drop stored credentials and mark the store unconfigured.
    async fn clear_credentials(&self) -> Result<(), StoreError>;
}
