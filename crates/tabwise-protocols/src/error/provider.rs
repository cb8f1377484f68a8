//! LLM provider errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("UNAUTHORIZED: {0}")]
    Unauthorized(String),

    #[error("FORBIDDEN: {0}")]
    Forbidden(String),

    #[error("INVALID_CREDENTIALS: {0}")]
    InvalidCredentials(String),

    #[error("RATE_LIMIT: {0}")]
    RateLimited(String),

    #[error("INVALID_RESPONSE: {0}")]
    InvalidResponse(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    #[error("ETIMEDOUT: {0}")]
    Timeout(String),

    #[error("ECONNREFUSED: {0}")]
    ConnectionRefused(String),

    #[error("INVALID_ENDPOINT: {0}")]
    InvalidEndpoint(String),
}

impl ProviderError {
    /// Map a non-2xx HTTP status and its body to a provider error.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => Self::Unauthorized(message),
            403 => Self::Forbidden(message),
            429 => Self::RateLimited(message),
            _ => Self::Http { status, message },
        }
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
