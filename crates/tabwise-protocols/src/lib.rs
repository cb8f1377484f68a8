//! # Tabwise Protocols
//!
//! Core protocol definitions for tabwise: the grouping data model, the
//! traits implemented by external collaborators, and the error taxonomy.
//!
//! ## Core Traits
//!
//! - [`GroupingProvider`] - LLM backend that proposes a partition of tabs
//! - [`TabStore`] - Host that owns the real tab/group state
//! - [`ConfigStore`] - Persistence for provider selection and credentials

pub mod error;
pub mod provider;
pub mod store;
pub mod types;

pub use error::{GroupingError, ProviderError, StoreError, ValidationError};
pub use provider::{GroupingProvider, RawGrouping};
pub use store::{ConfigStore, TabStore};
pub use types::*;
