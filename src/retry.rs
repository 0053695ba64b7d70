//! Bounded retry for calls to remote collaborators.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Delay between attempts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Backoff {
    /// Same pause before every retry
    Fixed { delay_ms: u64 },
    /// `initial_ms * multiplier^n` before the n-th retry, capped at `max_ms`
    Exponential {
        initial_ms: u64,
        multiplier: f64,
        max_ms: u64,
    },
}

impl Backoff {
    /// Pause before retry number `retry` (0 = the first retry)
    pub fn delay(&self, retry: u32) -> Duration {
        match *self {
            Self::Fixed { delay_ms } => Duration::from_millis(delay_ms),
            Self::Exponential {
                initial_ms,
                multiplier,
                max_ms,
            } => {
                let scaled = initial_ms as f64 * multiplier.powi(retry as i32);
                Duration::from_millis(scaled.min(max_ms as f64) as u64)
            }
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Fixed { delay_ms: 1000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total calls, including the first one
    pub max_attempts: u32,
    pub backoff: Backoff,
    /// Upper bound on a single attempt, unbounded when absent
    pub attempt_timeout_ms: Option<u64>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Backoff::default(),
            attempt_timeout_ms: None,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Backoff) -> Self {
        Self {
            max_attempts,
            backoff,
            attempt_timeout_ms: None,
        }
    }

    pub fn with_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.attempt_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn attempt_timeout(&self) -> Option<Duration> {
        self.attempt_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Error)]
pub enum RetryError<E> {
    #[error("Gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: E },
}

impl<E> RetryError<E> {
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Exhausted { attempts, .. } => *attempts,
        }
    }

    /// The error from the final attempt
    pub fn into_last(self) -> E {
        match self {
            Self::Exhausted { last, .. } => last,
        }
    }
}

/// Call `operation` until it succeeds or `policy.max_attempts` calls have failed.
///
/// Sleeps between attempts, never after the last one. A policy with zero attempts
/// still makes one call.
pub async fn with_retry<F, Fut, T, E>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_attempts => {
                tracing::error!(attempts = attempt, error = %e, "All attempts failed");
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    last: e,
                });
            }
            Err(e) => {
                let delay = policy.backoff.delay(attempt - 1);
                tracing::warn!(
                    attempt,
                    max = max_attempts,
                    backoff_ms = delay.as_millis() as u64,
                    error = %e,
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
