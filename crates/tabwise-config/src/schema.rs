//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub retry: RetrySettings,

    #[serde(default)]
    pub local: LocalSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Backoff shape between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    /// `base * attempt`
    Linear,
    /// `base * 2^attempt`
    Exponential,
}

/// Retry schedules for the two retried call sites.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrySettings {
    #[serde(default)]
    pub provider: ProviderRetrySettings,

    #[serde(default)]
    pub group: GroupRetrySettings,
}

/// Schedule for the LLM provider call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRetrySettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_provider_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default = "default_provider_backoff")]
    pub backoff: BackoffKind,
}

impl Default for ProviderRetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_provider_base_delay_ms(),
            backoff: default_provider_backoff(),
        }
    }
}

/// Schedule for each tab-group creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRetrySettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_group_base_delay_ms")]
    pub base_delay_ms: u64,

    #[serde(default = "default_group_backoff")]
    pub backoff: BackoffKind,
}

impl Default for GroupRetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_group_base_delay_ms(),
            backoff: default_group_backoff(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_provider_base_delay_ms() -> u64 {
    1000
}

fn default_provider_backoff() -> BackoffKind {
    BackoffKind::Linear
}

fn default_group_base_delay_ms() -> u64 {
    100
}

fn default_group_backoff() -> BackoffKind {
    BackoffKind::Exponential
}

/// Local (OpenAI-compatible) provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalSettings {
    #[serde(default = "default_reachability_timeout_ms")]
    pub reachability_timeout_ms: u64,
}

impl Default for LocalSettings {
    fn default() -> Self {
        Self {
            reachability_timeout_ms: default_reachability_timeout_ms(),
        }
    }
}

fn default_reachability_timeout_ms() -> u64 {
    5000
}

/// File locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_credentials_path")]
    pub credentials_path: String,

    #[serde(default = "default_session_path")]
    pub session_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
            session_path: default_session_path(),
        }
    }
}

fn default_credentials_path() -> String {
    "~/.tabwise/credentials.toml".to_string()
}

fn default_session_path() -> String {
    "~/.tabwise/session.json".to_string()
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default = "default_log_directory")]
    pub directory: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            directory: default_log_directory(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "~/.tabwise/logs".to_string()
}
