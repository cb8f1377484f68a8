//! Concrete provider construction.

use std::sync::Arc;
use std::time::Duration;

use tabwise_protocols::error::GroupingError;
use tabwise_protocols::provider::GroupingProvider;
use tabwise_protocols::types::{Credentials, ProviderKind};
use tabwise_provider_bedrock::BedrockProvider;
use tabwise_provider_gemini::GeminiProvider;
use tabwise_provider_local::LocalProvider;
use tabwise_runtime::ProviderFactory;

/// Builds the HTTP-backed provider matching the stored credentials.
pub(crate) struct DefaultProviderFactory {
    local_reachability_timeout: Duration,
}

impl DefaultProviderFactory {
    pub fn new(local_reachability_timeout: Duration) -> Self {
        Self {
            local_reachability_timeout,
        }
    }
}

impl ProviderFactory for DefaultProviderFactory {
    fn create(
        &self,
        kind: ProviderKind,
        credentials: &Credentials,
    ) -> Result<Arc<dyn GroupingProvider>, GroupingError> {
        let provider: Arc<dyn GroupingProvider> = match (kind, credentials) {
            (ProviderKind::Bedrock, Credentials::Bedrock(c)) => Arc::new(BedrockProvider::new(c)),
            (ProviderKind::Gemini, Credentials::Gemini(c)) => Arc::new(GeminiProvider::new(c)),
            (ProviderKind::Local, Credentials::Local(c)) => Arc::new(
                LocalProvider::new(c).with_reachability_timeout(self.local_reachability_timeout),
            ),
            (kind, other) => {
                return Err(GroupingError::Configuration(format!(
                    "{} credentials cannot be used with provider {}",
                    other.kind(),
                    kind
                )));
            }
        };
        Ok(provider)
    }
}
