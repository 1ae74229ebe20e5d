//! Poll loop timing and send retry configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::{PollSettings, RetryPolicy};

/// Poll loop timing.
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// Seconds to sleep between cycles.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Pause after each notification in milliseconds.
    #[serde(default = "default_send_interval_ms")]
    pub send_interval_ms: u64,
}

const fn default_interval_secs() -> u64 {
    60
}

const fn default_send_interval_ms() -> u64 {
    1_000
}

impl PollConfig {
    /// Loop settings for the given number of result pages.
    #[must_use]
    pub fn settings(&self, pages: u32) -> PollSettings {
        PollSettings {
            pages,
            interval: Duration::from_secs(self.interval_secs),
            send_interval: Duration::from_millis(self.send_interval_ms),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            send_interval_ms: default_send_interval_ms(),
        }
    }
}

/// Retry behaviour for rate-limited sends.
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per notification, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Lower bound of the randomized backoff in milliseconds.
    #[serde(default = "default_backoff_min_ms")]
    pub backoff_min_ms: u64,
    /// Upper bound of the randomized backoff in milliseconds.
    #[serde(default = "default_backoff_max_ms")]
    pub backoff_max_ms: u64,
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_backoff_min_ms() -> u64 {
    3_000
}

const fn default_backoff_max_ms() -> u64 {
    7_000
}

impl RetryConfig {
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            backoff_min: Duration::from_millis(self.backoff_min_ms),
            backoff_max: Duration::from_millis(self.backoff_max_ms),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_min_ms: default_backoff_min_ms(),
            backoff_max_ms: default_backoff_max_ms(),
        }
    }
}
