//! Tab state snapshots used for rollback.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BrowserTab, GroupColor, GroupId, TabGroupInfo, TabId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSnapshot {
    pub id: TabId,
    pub index: usize,
    pub group_id: Option<GroupId>,
    pub pinned: bool,
    pub url: String,
    pub title: String,
}

impl From<&BrowserTab> for TabSnapshot {
    fn from(tab: &BrowserTab) -> Self {
        Self {
            id: tab.id,
            index: tab.index,
            group_id: tab.group_id,
            pinned: tab.pinned,
            url: tab.url.clone(),
            title: tab.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub id: GroupId,
    pub title: String,
    pub color: GroupColor,
    pub collapsed: bool,
}

impl From<&TabGroupInfo> for GroupSnapshot {
    fn from(group: &TabGroupInfo) -> Self {
        Self {
            id: group.id,
            title: group.title.clone(),
            color: group.color,
            collapsed: group.collapsed,
        }
    }
}

/// Tab/group assignment captured before any mutation of a request.
///
/// Immutable once taken and never persisted across requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabStateSnapshot {
    pub timestamp: DateTime<Utc>,
    pub tabs: Vec<TabSnapshot>,
    pub groups: Vec<GroupSnapshot>,
}

impl TabStateSnapshot {
    pub fn new(tabs: &[BrowserTab], groups: &[TabGroupInfo]) -> Self {
        Self {
            timestamp: Utc::now(),
            tabs: tabs.iter().map(TabSnapshot::from).collect(),
            groups: groups.iter().map(GroupSnapshot::from).collect(),
        }
    }

    pub fn tab(&self, id: TabId) -> Option<&TabSnapshot> {
        self.tabs.iter().find(|t| t.id == id)
    }
}
