//! Tab state capture and rollback.
//!
//! Restore only guarantees that no grouping introduced by a failed request
//! survives. Tabs that were already grouped when the snapshot was taken are
//! left wherever they are now; recreating a removed group is out of reach.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use tabwise_protocols::store::TabStore;
use tabwise_protocols::types::{TabId, TabStateSnapshot};

pub struct TabStateManager {
    store: Arc<dyn TabStore>,
}

impl TabStateManager {
    pub fn new(store: Arc<dyn TabStore>) -> Self {
        Self { store }
    }

    /// Capture every tab and group. `None` if the tabs cannot be read.
    pub async fn snapshot(&self) -> Option<TabStateSnapshot> {
        let tabs = match self.store.list_tabs().await {
            Ok(tabs) => tabs,
            Err(e) => {
                warn!("Could not snapshot tab state: {}", e);
                return None;
            }
        };

        let groups = match self.store.list_groups().await {
            Ok(groups) => groups,
            Err(e) => {
                debug!("Group query unavailable, recording no groups: {}", e);
                Vec::new()
            }
        };

        let snapshot = TabStateSnapshot::new(&tabs, &groups);
        debug!(
            "Captured tab state: {} tabs, {} groups",
            snapshot.tabs.len(),
            snapshot.groups.len()
        );
        Some(snapshot)
    }

    /// Ungroup every tab that was ungrouped in `snapshot` but is grouped now.
    ///
    /// Returns `false` only when nothing could be restored at all.
    pub async fn restore(&self, snapshot: &TabStateSnapshot) -> bool {
        let current = match self.store.list_tabs().await {
            Ok(tabs) => tabs,
            Err(e) => {
                error!("Restore failed, cannot read tabs: {}", e);
                return false;
            }
        };

        let mut to_ungroup: Vec<TabId> = Vec::new();
        for tab in current.iter().filter(|t| t.is_grouped()) {
            match snapshot.tab(tab.id) {
                Some(before) if before.group_id.is_none() => to_ungroup.push(tab.id),
                Some(before) if before.group_id != tab.group_id => {
                    debug!("Tab {} moved between groups, leaving it grouped", tab.id);
                }
                _ => {}
            }
        }

        if to_ungroup.is_empty() {
            debug!("Restore: no newly grouped tabs");
            return true;
        }

        match self.store.ungroup(&to_ungroup).await {
            Ok(()) => {
                info!("Restored {} tabs to ungrouped", to_ungroup.len());
                true
            }
            Err(e) => {
                warn!("Batch ungroup failed ({}), retrying tab by tab", e);
                let mut restored = 0;
                for id in &to_ungroup {
                    match self.store.ungroup(std::slice::from_ref(id)).await {
                        Ok(()) => restored += 1,
                        Err(e) => warn!("Could not ungroup tab {}: {}", id, e),
                    }
                }
                info!("Restored {}/{} tabs to ungrouped", restored, to_ungroup.len());
                restored > 0
            }
        }
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
