//! Provider construction seam.

use std::sync::Arc;

use tabwise_protocols::error::GroupingError;
use tabwise_protocols::provider::GroupingProvider;
use tabwise_protocols::types::{Credentials, ProviderKind};

/// Builds a provider adapter from stored credentials.
///
/// Implementations reject credentials that do not belong to `kind` with
/// [`GroupingError::Configuration`].
pub trait ProviderFactory: Send + Sync {
    fn create(
        &self,
        kind: ProviderKind,
        credentials: &Credentials,
    ) -> Result<Arc<dyn GroupingProvider>, GroupingError>;
}
