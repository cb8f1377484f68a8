//! Grouping response validation errors.

use thiserror::Error;

/// Raised when a provider's normalized output breaks the canonical shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("INVALID_RESPONSE: response is not an object")]
    NotAnObject,

    #[error("INVALID_RESPONSE: groups must be an array")]
    GroupsNotArray,

    #[error("INVALID_RESPONSE: group {index} is not an object")]
    GroupNotObject { index: usize },

    #[error("INVALID_RESPONSE: group {index} is missing a string name")]
    MissingName { index: usize },

    #[error("INVALID_RESPONSE: group {index} has an empty name")]
    EmptyName { index: usize },

    #[error("INVALID_RESPONSE: tabIndices of group {index} must be an array")]
    TabIndicesNotArray { index: usize },

    #[error("INVALID_RESPONSE: tabIndices[{position}] of group {index} is not a number")]
    TabIndexNotNumber { index: usize, position: usize },
}
