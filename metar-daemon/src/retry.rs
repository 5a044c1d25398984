//! Bounded retry with a fixed backoff.
//!
//! The executor knows nothing about HTTP: the caller's attempt operation
//! decides whether each failure is worth another try.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Default pause between attempts.
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(2);

/// Outcome of a failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptError<E> {
    /// Transient failure; the executor may try again.
    Retryable(E),
    /// Permanent failure; the executor stops immediately.
    Fatal(E),
}

impl<E> AttemptError<E> {
    /// Classify an error with a predicate.
    pub fn classify(err: E, retryable: impl FnOnce(&E) -> bool) -> Self {
        if retryable(&err) {
            AttemptError::Retryable(err)
        } else {
            AttemptError::Fatal(err)
        }
    }

    pub fn into_inner(self) -> E {
        match self {
            AttemptError::Retryable(e) | AttemptError::Fatal(e) => e,
        }
    }
}

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Duration,
}

impl RetryPolicy {
    /// Create a policy allowing `max_attempts` tries (at least one).
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: DEFAULT_BACKOFF,
        }
    }

    /// Set the pause between attempts.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }
}

/// Run `attempt` until it succeeds, fails fatally, or the policy is exhausted.
///
/// `attempt` receives the 1-based attempt number. The executor sleeps for the
/// policy's backoff after every retryable failure except the last one, and
/// returns the last error once all attempts are used up.
pub async fn run_with_retry<T, E, F, Fut>(policy: RetryPolicy, mut attempt: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, AttemptError<E>>>,
{
    let mut n = 1;
    loop {
        match attempt(n).await {
            Ok(value) => return Ok(value),
            Err(AttemptError::Fatal(err)) => return Err(err),
            Err(AttemptError::Retryable(err)) => {
                if n >= policy.max_attempts {
                    return Err(err);
                }
                warn!(
                    attempt = n,
                    max_attempts = policy.max_attempts,
                    backoff_ms = policy.backoff.as_millis() as u64,
                    "attempt failed, retrying"
                );
                tokio::time::sleep(policy.backoff).await;
                n += 1;
            }
        }
    }
}
