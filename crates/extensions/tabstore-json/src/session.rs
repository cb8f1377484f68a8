//! On-disk session format.

use serde::{Deserialize, Serialize};

use tabwise_protocols::types::{BrowserTab, GroupId, TabGroupInfo};

/// Tabs in window order plus the groups they reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabSession {
    #[serde(default)]
    pub tabs: Vec<BrowserTab>,
    #[serde(default)]
    pub groups: Vec<TabGroupInfo>,
}

impl TabSession {
    pub fn new(tabs: Vec<BrowserTab>) -> Self {
        let mut session = Self {
            tabs,
            groups: Vec::new(),
        };
        session.reindex();
        session
    }

    /// Positions always follow window order.
    pub fn reindex(&mut self) {
        for (index, tab) in self.tabs.iter_mut().enumerate() {
            tab.index = index;
        }
    }

    /// Above every id in use, including ids tabs reference without a
    /// matching group entry.
    pub fn next_group_id(&self) -> GroupId {
        let listed = self.groups.iter().map(|g| g.id.0);
        let referenced = self.tabs.iter().filter_map(|t| t.group_id).map(|id| id.0);
        GroupId(listed.chain(referenced).max().unwrap_or(0) + 1)
    }

    /// Drop groups that no tab refers to anymore.
    pub fn prune_groups(&mut self) -> usize {
        let before = self.groups.len();
        let tabs = &self.tabs;
        self.groups
            .retain(|g| tabs.iter().any(|t| t.group_id == Some(g.id)));
        before - self.groups.len()
    }
}
