//! Bounded retry with fixed backoff

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Bounded-retry policy for transient failures.
///
/// A policy value rather than hardcoded constants so tests can run with
/// zero backoff. The default matches the remote backend's contract:
/// 3 attempts, 2 seconds between them.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Fixed delay between attempts
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Policy with no delay between attempts, for tests
    pub fn no_delay(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: Duration::ZERO,
        }
    }

    /// Run `op` until it succeeds or attempts are exhausted.
    ///
    /// The operation receives the 1-based attempt number. Failures before
    /// the last attempt are logged and followed by the fixed backoff; the
    /// last failure is returned to the caller.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < attempts => {
                    tracing::warn!(attempt, error = %err, "attempt failed, retrying");
                    if !self.backoff.is_zero() {
                        tokio::time::sleep(self.backoff).await;
                    }
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
