//! JSON-file tab store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use tabwise_protocols::error::StoreError;
use tabwise_protocols::store::TabStore;
use tabwise_protocols::types::{BrowserTab, GroupColor, GroupId, TabGroupInfo, TabId};

use crate::session::TabSession;

/// Tab store persisted to a JSON session file.
///
/// Every mutation is written back before it returns.
pub struct JsonTabStore {
    path: PathBuf,
    session: RwLock<TabSession>,
}

impl JsonTabStore {
    /// Load the session at `path`. A missing file is an empty window.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let session = if path.exists() {
            let content = fs::read_to_string(&path).await?;
            let mut session: TabSession = serde_json::from_str(&content)
                .map_err(|e| StoreError::Format(format!("{}: {}", path.display(), e)))?;
            session.reindex();
            session
        } else {
            debug!("No session file at {:?}, starting empty", path);
            TabSession::default()
        };

        info!(
            "Loaded tab session: {} tabs, {} groups",
            session.tabs.len(),
            session.groups.len()
        );
        Ok(Self {
            path,
            session: RwLock::new(session),
        })
    }

    /// Start from `session` and write it to `path` immediately.
    pub async fn create(path: impl AsRef<Path>, session: TabSession) -> Result<Self, StoreError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            session: RwLock::new(session),
        };
        store.save(&*store.session.read().await).await?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn save(&self, session: &TabSession) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(session)
            .map_err(|e| StoreError::Format(e.to_string()))?;
        fs::write(&self.path, content).await?;
        debug!("Saved tab session to {:?}", self.path);
        Ok(())
    }
}

#[async_trait]
impl TabStore for JsonTabStore {
    async fn list_tabs(&self) -> Result<Vec<BrowserTab>, StoreError> {
        Ok(self.session.read().await.tabs.clone())
    }

    async fn list_groups(&self) -> Result<Vec<TabGroupInfo>, StoreError> {
        Ok(self.session.read().await.groups.clone())
    }

    async fn create_group(
        &self,
        name: &str,
        color: GroupColor,
        tab_ids: &[TabId],
    ) -> Result<GroupId, StoreError> {
        if tab_ids.is_empty() {
            return Err(StoreError::InvalidRequest("no tabs to group".to_string()));
        }

        let mut session = self.session.write().await;
        if let Some(missing) = tab_ids
            .iter()
            .find(|id| !session.tabs.iter().any(|t| t.id == **id))
        {
            return Err(StoreError::TabNotFound(*missing));
        }

        let mut updated = session.clone();
        let id = updated.next_group_id();
        for tab in updated.tabs.iter_mut().filter(|t| tab_ids.contains(&t.id)) {
            tab.group_id = Some(id);
        }
        updated.groups.push(TabGroupInfo {
            id,
            title: name.to_string(),
            color,
            collapsed: false,
        });
        updated.prune_groups();

        self.save(&updated).await?;
        *session = updated;
        Ok(id)
    }

    async fn ungroup(&self, tab_ids: &[TabId]) -> Result<(), StoreError> {
        if tab_ids.is_empty() {
            return Err(StoreError::InvalidRequest("no tabs to ungroup".to_string()));
        }

        let mut session = self.session.write().await;
        let mut updated = session.clone();
        for tab in updated.tabs.iter_mut().filter(|t| tab_ids.contains(&t.id)) {
            tab.group_id = None;
        }
        let dropped = updated.prune_groups();
        if dropped > 0 {
            debug!("Removed {} empty groups", dropped);
        }

        self.save(&updated).await?;
        *session = updated;
        Ok(())
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
