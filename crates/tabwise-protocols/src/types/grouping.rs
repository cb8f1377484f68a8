//! Grouping proposals and apply outcomes.

use serde::{Deserialize, Serialize};

/// An LLM-suggested named cluster of tab indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupProposal {
    pub name: String,
    pub tab_indices: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl GroupProposal {
    pub fn new(name: impl Into<String>, tab_indices: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            tab_indices,
            reasoning: None,
        }
    }
}

/// Validated output of a provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupingResult {
    pub groups: Vec<GroupProposal>,
}

/// A group whose creation failed after every retry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupFailure {
    pub name: String,
    pub error: String,
    pub tab_count: usize,
}

/// Summary of applying a grouping result to the tab store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyOutcome {
    pub groups_created: usize,
    pub group_names: Vec<String>,
    pub failed_groups: usize,
    pub partial_success: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<GroupFailure>,
}
