//! Application paths and the mapping from config to runtime settings.

use std::path::PathBuf;
use std::time::Duration;

use tabwise_config::{BackoffKind, Config, ConfigLoader};
use tabwise_runtime::{Backoff, GroupingSettings, RetryPolicy};

/// `~/.tabwise`, or `.tabwise` when there is no home directory.
pub(crate) fn tabwise_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".tabwise"))
        .unwrap_or_else(|| PathBuf::from(".tabwise"))
}

pub(crate) fn default_config_path() -> PathBuf {
    tabwise_dir().join("config.toml")
}

pub(crate) fn expand(path: &str) -> PathBuf {
    PathBuf::from(ConfigLoader::expand_path(path))
}

fn backoff(kind: BackoffKind) -> Backoff {
    match kind {
        BackoffKind::Linear => Backoff::Linear,
        BackoffKind::Exponential => Backoff::Exponential,
    }
}

pub(crate) fn grouping_settings(config: &Config) -> GroupingSettings {
    let provider = &config.retry.provider;
    let group = &config.retry.group;
    GroupingSettings::new(
        RetryPolicy::new(
            provider.max_attempts,
            Duration::from_millis(provider.base_delay_ms),
            backoff(provider.backoff),
        ),
        RetryPolicy::new(
            group.max_attempts,
            Duration::from_millis(group.base_delay_ms),
            backoff(group.backoff),
        ),
    )
}

pub(crate) fn local_reachability_timeout(config: &Config) -> Duration {
    Duration::from_millis(config.local.reachability_timeout_ms)
}
