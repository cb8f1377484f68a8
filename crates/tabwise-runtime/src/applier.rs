//! Applies a validated grouping to the tab store.
//!
//! Each proposal is created in order with its own retry budget. One group's
//! failure never aborts the others; only a request where every attempted
//! group failed is rolled back.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use tabwise_protocols::error::{GroupingError, StoreError};
use tabwise_protocols::store::TabStore;
use tabwise_protocols::types::{
    ApplyOutcome, GroupColor, GroupFailure, GroupId, GroupProposal, GroupingResult, TabId,
};

use crate::retry::{with_retry, RetryPolicy};
use crate::snapshot::TabStateManager;

pub struct GroupingApplier {
    store: Arc<dyn TabStore>,
    state: TabStateManager,
    retry: RetryPolicy,
}

impl GroupingApplier {
    pub fn new(store: Arc<dyn TabStore>, retry: RetryPolicy) -> Self {
        Self {
            state: TabStateManager::new(store.clone()),
            store,
            retry,
        }
    }

    pub async fn apply(&self, result: &GroupingResult) -> Result<ApplyOutcome, GroupingError> {
        let snapshot = self.state.snapshot().await;

        // Indices must reflect the tabs as they are now, not at prompt time.
        let tabs = self.store.list_tabs().await?;
        let index_map: HashMap<i64, TabId> = tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| (index as i64, tab.id))
            .collect();

        let mut outcome = ApplyOutcome::default();
        let mut attempted = 0usize;

        for proposal in &result.groups {
            let tab_ids = resolve(proposal, &index_map);
            if tab_ids.is_empty() {
                debug!("Skipping group '{}': no matching tabs", proposal.name);
                continue;
            }

            let color = GroupColor::for_slot(attempted);
            attempted += 1;

            match self.create_group(&proposal.name, color, &tab_ids).await {
                Ok(group_id) => {
                    info!(
                        "Created group '{}' ({}, {} tabs) as {}",
                        proposal.name,
                        color,
                        tab_ids.len(),
                        group_id
                    );
                    outcome.groups_created += 1;
                    outcome.group_names.push(proposal.name.clone());
                }
                Err(e) => {
                    warn!("Failed to create group '{}': {}", proposal.name, e);
                    outcome.failed_groups += 1;
                    outcome.failures.push(GroupFailure {
                        name: proposal.name.clone(),
                        error: e.to_string(),
                        tab_count: tab_ids.len(),
                    });
                }
            }
        }

        if outcome.groups_created == 0 && attempted > 0 {
            let restored = match &snapshot {
                Some(snapshot) => self.state.restore(snapshot).await,
                None => {
                    warn!("No snapshot available, skipping restore");
                    false
                }
            };
            let last_error = outcome
                .failures
                .last()
                .map(|f| f.error.clone())
                .unwrap_or_default();
            error!(
                "All {} tab groups failed (restored: {}): {}",
                attempted, restored, last_error
            );
            return Err(GroupingError::AllGroupsFailed {
                attempted,
                restored,
                last_error,
            });
        }

        outcome.partial_success = outcome.failed_groups > 0 && outcome.groups_created > 0;
        Ok(outcome)
    }

    async fn create_group(
        &self,
        name: &str,
        color: GroupColor,
        tab_ids: &[TabId],
    ) -> Result<GroupId, StoreError> {
        with_retry(&self.retry, "create_group", || {
            let store = self.store.clone();
            let name = name.to_string();
            let tab_ids = tab_ids.to_vec();
            async move { store.create_group(&name, color, &tab_ids).await }
        })
        .await
    }
}

/// Map provider indices to current tab handles, dropping unknown and repeated ones.
fn resolve(proposal: &GroupProposal, index_map: &HashMap<i64, TabId>) -> Vec<TabId> {
    let mut tab_ids = Vec::with_capacity(proposal.tab_indices.len());
    for index in &proposal.tab_indices {
        match index_map.get(index) {
            Some(id) if !tab_ids.contains(id) => tab_ids.push(*id),
            Some(_) => {}
            None => debug!("Dropping unknown tab index {} from '{}'", index, proposal.name),
        }
    }
    tab_ids
}

#[cfg(test)]
#[path = "applier_tests.rs"]
mod tests;
