//! Scripted collaborators shared by the runtime tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use tabwise_protocols::error::{GroupingError, ProviderError, StoreError};
use tabwise_protocols::provider::{GroupingProvider, RawGrouping};
use tabwise_protocols::store::TabStore;
use tabwise_protocols::types::{
    BrowserTab, Credentials, GroupColor, GroupId, ProviderKind, TabGroupInfo, TabId, TabMetadata,
};

use crate::factory::ProviderFactory;

pub(crate) fn tabs(count: usize) -> Vec<BrowserTab> {
    (0..count)
        .map(|i| {
            let mut tab = BrowserTab::new(
                100 + i as i64,
                format!("Tab {i}"),
                format!("https://site{i}.example.com/page"),
            );
            tab.index = i;
            tab
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CreateCall {
    pub name: String,
    pub color: GroupColor,
    pub tab_ids: Vec<TabId>,
}

#[derive(Default)]
struct FakeState {
    tabs: Vec<BrowserTab>,
    groups: Vec<TabGroupInfo>,
    next_group_id: i64,
    creates: Vec<CreateCall>,
    ungroups: Vec<Vec<TabId>>,
    /// Remaining forced failures per group name, with the error text to use.
    create_failures: HashMap<String, (usize, String)>,
    fail_all_creates: Option<String>,
    list_calls: usize,
    fail_list_from_call: Option<usize>,
    fail_ungroup: bool,
    groups_unsupported: bool,
}

/// Tab store whose group creation actually assigns tabs, so restore can observe it.
pub(crate) struct FakeTabStore {
    state: Mutex<FakeState>,
}

impl FakeTabStore {
    pub fn new(tabs: Vec<BrowserTab>) -> Self {
        Self {
            state: Mutex::new(FakeState {
                tabs,
                next_group_id: 1,
                ..Default::default()
            }),
        }
    }

    /// Fail the first `times` creations of `name`.
    pub fn fail_group(&self, name: &str, times: usize, message: &str) {
        self.state
            .lock()
            .create_failures
            .insert(name.to_string(), (times, message.to_string()));
    }

    pub fn fail_all_creates(&self, message: &str) {
        self.state.lock().fail_all_creates = Some(message.to_string());
    }

    /// `list_tabs` fails from the `n`-th call on (1-based).
    pub fn fail_list_from_call(&self, n: usize) {
        self.state.lock().fail_list_from_call = Some(n);
    }

    pub fn fail_ungroup(&self) {
        self.state.lock().fail_ungroup = true;
    }

    pub fn without_group_query(&self) {
        self.state.lock().groups_unsupported = true;
    }

    pub fn set_group(&self, tab: TabId, group: Option<GroupId>) {
        let mut state = self.state.lock();
        if let Some(t) = state.tabs.iter_mut().find(|t| t.id == tab) {
            t.group_id = group;
        }
    }

    pub fn add_group(&self, group: TabGroupInfo) {
        self.state.lock().groups.push(group);
    }

    pub fn creates(&self) -> Vec<CreateCall> {
        self.state.lock().creates.clone()
    }

    pub fn ungroups(&self) -> Vec<Vec<TabId>> {
        self.state.lock().ungroups.clone()
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().list_calls
    }

    pub fn current_tabs(&self) -> Vec<BrowserTab> {
        self.state.lock().tabs.clone()
    }
}

#[async_trait]
impl TabStore for FakeTabStore {
    async fn list_tabs(&self) -> Result<Vec<BrowserTab>, StoreError> {
        let mut state = self.state.lock();
        state.list_calls += 1;
        if let Some(n) = state.fail_list_from_call {
            if state.list_calls >= n {
                return Err(StoreError::Unavailable("tabs query failed".to_string()));
            }
        }
        Ok(state.tabs.clone())
    }

    async fn list_groups(&self) -> Result<Vec<TabGroupInfo>, StoreError> {
        let state = self.state.lock();
        if state.groups_unsupported {
            return Err(StoreError::Unsupported("list_groups".to_string()));
        }
        Ok(state.groups.clone())
    }

    async fn create_group(
        &self,
        name: &str,
        color: GroupColor,
        tab_ids: &[TabId],
    ) -> Result<GroupId, StoreError> {
        let mut state = self.state.lock();
        state.creates.push(CreateCall {
            name: name.to_string(),
            color,
            tab_ids: tab_ids.to_vec(),
        });

        if tab_ids.is_empty() {
            return Err(StoreError::InvalidRequest("no tabs to group".to_string()));
        }
        if let Some(message) = &state.fail_all_creates {
            return Err(StoreError::GroupCreation(message.clone()));
        }
        if let Some((remaining, message)) = state.create_failures.get_mut(name) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(StoreError::GroupCreation(message.clone()));
            }
        }

        let id = GroupId(state.next_group_id);
        state.next_group_id += 1;
        for tab in state.tabs.iter_mut().filter(|t| tab_ids.contains(&t.id)) {
            tab.group_id = Some(id);
        }
        state.groups.push(TabGroupInfo {
            id,
            title: name.to_string(),
            color,
            collapsed: false,
        });
        Ok(id)
    }

    async fn ungroup(&self, tab_ids: &[TabId]) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        state.ungroups.push(tab_ids.to_vec());
        if state.fail_ungroup {
            return Err(StoreError::Unavailable("ungroup failed".to_string()));
        }
        for tab in state.tabs.iter_mut().filter(|t| tab_ids.contains(&t.id)) {
            tab.group_id = None;
        }
        Ok(())
    }
}

/// Provider that replays scripted responses in order.
pub(crate) struct FakeProvider {
    responses: Mutex<VecDeque<Result<RawGrouping, ProviderError>>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<Option<String>>>,
    seen_tabs: Mutex<Vec<TabMetadata>>,
}

impl FakeProvider {
    pub fn new(responses: Vec<Result<RawGrouping, ProviderError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            seen_tabs: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<Option<String>> {
        self.prompts.lock().clone()
    }

    pub fn seen_tabs(&self) -> Vec<TabMetadata> {
        self.seen_tabs.lock().clone()
    }
}

#[async_trait]
impl GroupingProvider for FakeProvider {
    fn id(&self) -> &str {
        "fake"
    }

    async fn group_tabs(
        &self,
        tabs: &[TabMetadata],
        custom_prompt: Option<&str>,
    ) -> Result<RawGrouping, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().push(custom_prompt.map(str::to_string));
        *self.seen_tabs.lock() = tabs.to_vec();
        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ProviderError::Network("no scripted response".to_string())))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.lock().pop_front() {
            Some(Err(e)) => Err(e),
            _ => Ok(()),
        }
    }
}

/// Factory handing out one shared provider.
pub(crate) struct FakeFactory {
    provider: Arc<FakeProvider>,
    created: Mutex<Vec<ProviderKind>>,
}

impl FakeFactory {
    pub fn new(provider: Arc<FakeProvider>) -> Self {
        Self {
            provider,
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn created(&self) -> Vec<ProviderKind> {
        self.created.lock().clone()
    }
}

impl ProviderFactory for FakeFactory {
    fn create(
        &self,
        kind: ProviderKind,
        _credentials: &Credentials,
    ) -> Result<Arc<dyn GroupingProvider>, GroupingError> {
        self.created.lock().push(kind);
        Ok(self.provider.clone())
    }
}
