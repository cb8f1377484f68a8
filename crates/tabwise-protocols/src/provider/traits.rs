//! Grouping provider trait definition.

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::TabMetadata;

/// Parsed but unvalidated provider output, expected to look like
/// `{"groups": [{"name": ..., "tabIndices": [...]}]}`.
pub type RawGrouping = serde_json::Value;

/// Core trait for LLM grouping backends.
#[async_trait]
pub trait GroupingProvider: Send + Sync {
    /// Returns the provider ID.
    fn id(&self) -> &str;

    /// Ask the backend to partition `tabs` into named groups.
    async fn group_tabs(
        &self,
        tabs: &[TabMetadata],
        custom_prompt: Option<&str>,
    ) -> Result<RawGrouping, ProviderError>;

    /// Cheapest authenticated round trip the backend supports.
    async fn test_connection(&self) -> Result<(), ProviderError>;
}
