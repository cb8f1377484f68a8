//! Retry with backoff, gated by the failure classifier.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::classifier::classify;

/// Delay growth between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// `base * n` after the n-th failure.
    Linear,
    /// `base * 2^(n-1)` after the n-th failure.
    Exponential,
}

/// Retry configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total tries, including the first one.
    pub max_attempts: u32,
    /// Base delay between retries.
    pub base_delay: Duration,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, backoff: Backoff) -> Self {
        Self {
            max_attempts,
            base_delay,
            backoff,
        }
    }

    /// Schedule for the LLM provider call: 1s, 2s.
    pub fn provider_default() -> Self {
        Self::new(3, Duration::from_secs(1), Backoff::Linear)
    }

    /// Schedule for each tab-group creation: 100ms, 200ms.
    pub fn group_default() -> Self {
        Self::new(3, Duration::from_millis(100), Backoff::Exponential)
    }

    /// Delay to wait after the `failed_attempts`-th failure (1-based).
    pub fn delay_for_attempt(&self, failed_attempts: u32) -> Duration {
        let n = failed_attempts.max(1);
        match self.backoff {
            Backoff::Linear => self.base_delay.saturating_mul(n),
            Backoff::Exponential => {
                let factor = 2u32.saturating_pow(n - 1);
                self.base_delay.saturating_mul(factor)
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::provider_default()
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// the policy's attempts are used up. The last error is returned unchanged.
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy, label: &str, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}/{}", label, attempt, max_attempts);
                }
                return Ok(value);
            }
            Err(e) => {
                if !classify(&e).is_retryable() {
                    debug!("{} failed with non-retryable error: {}", label, e);
                    return Err(e);
                }
                if attempt >= max_attempts {
                    warn!("{} failed after {} attempts: {}", label, attempt, e);
                    return Err(e);
                }

                let delay = policy.delay_for_attempt(attempt);
                warn!(
                    "{} failed (attempt {}/{}): {}, retrying in {:?}",
                    label, attempt, max_attempts, e, delay
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
