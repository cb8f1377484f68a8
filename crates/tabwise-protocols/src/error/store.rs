//! Tab store and credential store errors.

use thiserror::Error;

use crate::types::TabId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Tab store unavailable: {0}")]
    Unavailable(String),

    #[error("Operation not supported by store: {0}")]
    Unsupported(String),

    #[error("Tab group creation failed: {0}")]
    GroupCreation(String),

    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    #[error("Invalid store request: {0}")]
    InvalidRequest(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage format error: {0}")]
    Format(String),
}
