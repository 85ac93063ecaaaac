//! Bounded fixed-delay retry for fallible async operations.
//!
//! Used both for individual storage calls (retrying only transient
//! failures) and for storage initialization at startup (retrying any
//! failure). The caller decides which errors are worth another attempt.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Tunable parameters for the retry strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first. Values below 1 are
    /// treated as 1.
    pub max_attempts: u32,
    /// Pause between consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(100),
        }
    }
}

/// Run `op` until it succeeds, returns an error for which `should_retry`
/// is `false`, or `policy.max_attempts` attempts have been made.
///
/// The last error is returned unchanged once retries are exhausted.
pub async fn retry<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    mut should_retry: P,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: FnMut(&E) -> bool,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts && should_retry(&err) => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms = policy.delay.as_millis() as u64,
                    error = %err,
                    "Operation failed, retrying",
                );
                if !policy.delay.is_zero() {
                    tokio::time::sleep(policy.delay).await;
                }
            }
            Err(err) => return Err(err),
        }
    }
}
