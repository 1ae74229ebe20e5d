//! Bounded retry policy for rate-limited sends.

use std::time::Duration;

use rand::Rng;

/// How often and how long to wait when the messenger is rate limited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per send, including the first one.
    pub max_attempts: u32,
    /// Lower bound of the randomized base delay.
    pub backoff_min: Duration,
    /// Upper bound of the randomized base delay.
    pub backoff_max: Duration,
}

impl RetryPolicy {
    /// A policy that retries immediately; handy for tests.
    #[must_use]
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff_min: Duration::ZERO,
            backoff_max: Duration::ZERO,
        }
    }

    /// Delay before retry number `retry` (1-based).
    ///
    /// A server-provided wait wins. Otherwise a random base delay in
    /// `[backoff_min, backoff_max]` is doubled for every further retry.
    #[must_use]
    pub fn delay(&self, retry: u32, retry_after: Option<Duration>) -> Duration {
        if let Some(wait) = retry_after {
            return wait;
        }
        let base = self.jitter();
        let factor = 1u32 << retry.saturating_sub(1).min(16);
        base.saturating_mul(factor)
    }

    fn jitter(&self) -> Duration {
        let (lo, hi) = (self.backoff_min, self.backoff_max.max(self.backoff_min));
        if lo == hi {
            return lo;
        }
        let millis = rand::thread_rng().gen_range(lo.as_millis()..=hi.as_millis());
        Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_min: Duration::from_secs(3),
            backoff_max: Duration::from_secs(7),
        }
    }
}
