//! Fixed-delay retry policy
//!
//! Attempts are counted from one and include the first try. Between attempts
//! the policy waits a constant delay; the wait races the caller's
//! cancellation token so a cancelled operation never sleeps out its delay.

use crate::error::{Error, Result};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// How many times to try a request and how long to wait between tries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Constant delay between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Create a policy; zero attempts is treated as one
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// A policy that never retries
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Whether another attempt may follow `attempt` (1-based)
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Sleep for the delay, or return [`Error::Cancelled`] as soon as the
    /// token fires
    pub async fn wait(&self, cancel: &CancellationToken) -> Result<()> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => Err(Error::Cancelled),
            () = tokio::time::sleep(self.delay) => Ok(()),
        }
    }
}
