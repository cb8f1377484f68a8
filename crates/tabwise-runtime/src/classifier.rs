//! Failure classification.
//!
//! Classification works on the rendered error text only, so any error type
//! that carries a taxonomy token in its message is understood.

use std::fmt;

/// Whether a failed operation is worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Retryable,
    NonRetryable,
}

impl Classification {
    pub fn is_retryable(self) -> bool {
        self == Classification::Retryable
    }
}

/// Substrings that make a failure permanent. Checked before [`RETRYABLE_PATTERNS`].
const NON_RETRYABLE_PATTERNS: &[&str] = &[
    "credentials",
    "authentication",
    "unauthorized",
    "401",
    "forbidden",
    "403",
    "not found",
    "404",
    "invalid",
    "bad request",
    "400",
    "rate_limit",
    "rate limit",
    "no_config",
    "empty_prompt",
    "no_tabs",
];

const RETRYABLE_PATTERNS: &[&str] = &[
    "network",
    "timeout",
    "etimedout",
    "econnreset",
    "500",
    "502",
    "503",
    "504",
];

/// Classify an error message. `None` and unrecognized text are retryable.
pub fn classify_message(message: Option<&str>) -> Classification {
    let Some(message) = message else {
        return Classification::Retryable;
    };
    let lower = message.to_lowercase();

    if NON_RETRYABLE_PATTERNS.iter().any(|p| lower.contains(p)) {
        return Classification::NonRetryable;
    }
    if RETRYABLE_PATTERNS.iter().any(|p| lower.contains(p)) {
        return Classification::Retryable;
    }
    Classification::Retryable
}

/// Classify any displayable error.
pub fn classify<E: fmt::Display + ?Sized>(error: &E) -> Classification {
    classify_message(Some(&error.to_string()))
}

/// Stable taxonomy of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoConfig,
    EmptyPrompt,
    NoTabs,
    Busy,
    InvalidCredentials,
    Unauthorized,
    Forbidden,
    RateLimit,
    InvalidResponse,
    NotFound,
    BadRequest,
    Timeout,
    ConnectionRefused,
    NetworkError,
    ServerError,
    GroupCreationFailed,
    Unknown,
}

impl ErrorKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ErrorKind::NoConfig => "NO_CONFIG",
            ErrorKind::EmptyPrompt => "EMPTY_PROMPT",
            ErrorKind::NoTabs => "NO_TABS",
            ErrorKind::Busy => "BUSY",
            ErrorKind::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::RateLimit => "RATE_LIMIT",
            ErrorKind::InvalidResponse => "INVALID_RESPONSE",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::Timeout => "TIMEOUT",
            ErrorKind::ConnectionRefused => "CONNECTION_REFUSED",
            ErrorKind::NetworkError => "NETWORK_ERROR",
            ErrorKind::ServerError => "SERVER_ERROR",
            ErrorKind::GroupCreationFailed => "GROUP_CREATION_FAILED",
            ErrorKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// First match wins; specific tags come before the generic keywords.
const KIND_PATTERNS: &[(&str, ErrorKind)] = &[
    ("no_config", ErrorKind::NoConfig),
    ("empty_prompt", ErrorKind::EmptyPrompt),
    ("no_tabs", ErrorKind::NoTabs),
    ("busy:", ErrorKind::Busy),
    ("failed to create any", ErrorKind::GroupCreationFailed),
    ("invalid_credentials", ErrorKind::InvalidCredentials),
    ("credentials", ErrorKind::InvalidCredentials),
    ("unauthorized", ErrorKind::Unauthorized),
    ("authentication", ErrorKind::Unauthorized),
    ("401", ErrorKind::Unauthorized),
    ("forbidden", ErrorKind::Forbidden),
    ("403", ErrorKind::Forbidden),
    ("rate_limit", ErrorKind::RateLimit),
    ("rate limit", ErrorKind::RateLimit),
    ("429", ErrorKind::RateLimit),
    ("invalid_response", ErrorKind::InvalidResponse),
    ("parse", ErrorKind::InvalidResponse),
    ("not found", ErrorKind::NotFound),
    ("404", ErrorKind::NotFound),
    ("bad request", ErrorKind::BadRequest),
    ("invalid", ErrorKind::BadRequest),
    ("400", ErrorKind::BadRequest),
    ("etimedout", ErrorKind::Timeout),
    ("timeout", ErrorKind::Timeout),
    ("econnrefused", ErrorKind::ConnectionRefused),
    ("network", ErrorKind::NetworkError),
    ("econnreset", ErrorKind::NetworkError),
    ("500", ErrorKind::ServerError),
    ("502", ErrorKind::ServerError),
    ("503", ErrorKind::ServerError),
    ("504", ErrorKind::ServerError),
];

/// Map an error message to its taxonomy tag.
pub fn categorize(message: &str) -> ErrorKind {
    let lower = message.to_lowercase();
    KIND_PATTERNS
        .iter()
        .find(|(pattern, _)| lower.contains(pattern))
        .map(|(_, kind)| *kind)
        .unwrap_or(ErrorKind::Unknown)
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
