//! Tab and tab-group types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle of an open tab, stable for the duration of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub i64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a tab group owned by the tab store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub i64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tab as reported by the tab store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserTab {
    pub id: TabId,
    #[serde(default)]
    pub index: usize,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub pinned: bool,
}

impl BrowserTab {
    pub fn new(id: i64, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: TabId(id),
            index: 0,
            title: title.into(),
            url: url.into(),
            group_id: None,
            pinned: false,
        }
    }

    pub fn is_grouped(&self) -> bool {
        self.group_id.is_some()
    }
}

/// The only view of a tab handed to an LLM provider.
///
/// `index` is the tab's position in the tab list at collection time; it is
/// the sole identifier the provider sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabMetadata {
    pub id: TabId,
    pub index: usize,
    pub title: String,
    pub url: String,
}

impl TabMetadata {
    /// Number tabs by their position in `tabs`.
    pub fn collect(tabs: &[BrowserTab]) -> Vec<TabMetadata> {
        tabs.iter()
            .enumerate()
            .map(|(index, tab)| TabMetadata {
                id: tab.id,
                index,
                title: tab.title.clone(),
                url: tab.url.clone(),
            })
            .collect()
    }
}

/// Tab group colors, in palette order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColor {
    Grey,
    Blue,
    Red,
    Yellow,
    Green,
    Pink,
    Purple,
    Cyan,
    Orange,
}

/// Fixed palette cycled through as groups are created.
pub const GROUP_COLOR_PALETTE: [GroupColor; 9] = [
    GroupColor::Grey,
    GroupColor::Blue,
    GroupColor::Red,
    GroupColor::Yellow,
    GroupColor::Green,
    GroupColor::Pink,
    GroupColor::Purple,
    GroupColor::Cyan,
    GroupColor::Orange,
];

impl GroupColor {
    /// Color for the `slot`-th attempted group.
    pub fn for_slot(slot: usize) -> Self {
        GROUP_COLOR_PALETTE[slot % GROUP_COLOR_PALETTE.len()]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupColor::Grey => "grey",
            GroupColor::Blue => "blue",
            GroupColor::Red => "red",
            GroupColor::Yellow => "yellow",
            GroupColor::Green => "green",
            GroupColor::Pink => "pink",
            GroupColor::Purple => "purple",
            GroupColor::Cyan => "cyan",
            GroupColor::Orange => "orange",
        }
    }
}

impl fmt::Display for GroupColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An existing tab group as reported by the tab store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabGroupInfo {
    pub id: GroupId,
    #[serde(default)]
    pub title: String,
    pub color: GroupColor,
    #[serde(default)]
    pub collapsed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_starts_grey_blue() {
        assert_eq!(GroupColor::for_slot(0), GroupColor::Grey);
        assert_eq!(GroupColor::for_slot(1), GroupColor::Blue);
    }

    #[test]
    fn test_palette_wraps_after_nine() {
        assert_eq!(GroupColor::for_slot(8), GroupColor::Orange);
        assert_eq!(GroupColor::for_slot(9), GroupColor::Grey);
        assert_eq!(GroupColor::for_slot(10), GroupColor::Blue);
    }

    #[test]
    fn test_color_serializes_lowercase() {
        let json = serde_json::to_value(GroupColor::Purple).unwrap();
        assert_eq!(json, "purple");
    }

    #[test]
    fn test_metadata_uses_position() {
        let mut second = BrowserTab::new(42, "Docs", "https://docs.rs");
        second.index = 7;
        let tabs = vec![BrowserTab::new(10, "Rust", "https://rust-lang.org"), second];

        let metadata = TabMetadata::collect(&tabs);
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata[1].index, 1);
        assert_eq!(metadata[1].id, TabId(42));
    }

    #[test]
    fn test_browser_tab_deserializes_camel_case() {
        let tab: BrowserTab = serde_json::from_value(serde_json::json!({
            "id": 3,
            "index": 1,
            "title": "Mail",
            "url": "https://mail.example.com",
            "groupId": 9,
            "pinned": true
        }))
        .unwrap();
        assert_eq!(tab.group_id, Some(GroupId(9)));
        assert!(tab.pinned);
        assert!(tab.is_grouped());
    }
}
