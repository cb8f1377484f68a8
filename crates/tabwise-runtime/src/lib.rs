//! # Tabwise Runtime
//!
//! The grouping pipeline: ask a provider for a partition of the open tabs,
//! validate it, apply it to the tab store with per-group isolation, and roll
//! back on complete failure.

pub mod applier;
pub mod classifier;
pub mod factory;
pub mod orchestrator;
pub mod response;
pub mod retry;
pub mod snapshot;
pub mod validator;

#[cfg(test)]
mod testing;

pub use applier::GroupingApplier;
pub use classifier::{categorize, classify, classify_message, Classification, ErrorKind};
pub use factory::ProviderFactory;
pub use orchestrator::{GroupingSettings, TabGrouper};
pub use response::{GroupingResponse, ResponseData};
pub use retry::{with_retry, Backoff, RetryPolicy};
pub use snapshot::TabStateManager;
pub use validator::validate;
