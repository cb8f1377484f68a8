//! Request-level grouping errors.

use thiserror::Error;

use super::{ProviderError, StoreError, ValidationError};
use crate::types::ProviderKind;

#[derive(Debug, Error)]
pub enum GroupingError {
    #[error("NO_CONFIG: No AI provider is configured. Add provider credentials in settings")]
    NoConfig,

    #[error("NO_CONFIG: {provider} is marked as configured but its credentials are missing")]
    MissingCredentials { provider: ProviderKind },

    #[error("EMPTY_PROMPT: Please enter grouping instructions")]
    EmptyPrompt,

    #[error("NO_TABS: There are no open tabs to group")]
    NoTabs,

    #[error("BUSY: A grouping request is already in progress")]
    Busy,

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Tab store error: {0}")]
    Store(#[from] StoreError),

    #[error("Failed to create any of {attempted} tab groups ({}). Last error: {last_error}", restore_note(.restored))]
    AllGroupsFailed {
        attempted: usize,
        restored: bool,
        last_error: String,
    },
}

fn restore_note(restored: &bool) -> &'static str {
    if *restored {
        "original tab state restored"
    } else {
        "tab state could not be restored"
    }
}
