//! Bounded exponential backoff around a single Reddit call.
//!
//! Only rate limiting is retried. Every other failure ends the run right
//! away with a message that names its category:
//!
//! ```text
//! attempt 1 ── RATELIMIT ── sleep 1 ── attempt 2 ── RATELIMIT ── sleep 2 ── attempt 3 ── RATELIMIT ── RateLimitExceeded
//! ```

use std::{future::Future, time::Duration};

use crate::{
    Res,
    error::Error,
    reddit::RedditError,
    warning,
};

/// Why a single attempt failed.
#[derive(Debug)]
pub enum Failure {
    /// Reddit (or the connection to it) failed; classified by the executor.
    Upstream(RedditError),
    /// Already a final answer for the user; returned without retrying.
    Fatal(Error),
}

impl From<RedditError> for Failure {
    fn from(err: RedditError) -> Self {
        Failure::Upstream(err)
    }
}

impl From<Error> for Failure {
    fn from(err: Error) -> Self {
        Failure::Fatal(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..Self::default()
        }
    }

    /// Delay after the zero-based `attempt` failed: `base_delay * 2^attempt`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Final error for an upstream failure that is not going to be retried.
pub fn classify(err: RedditError) -> Error {
    match err {
        RedditError::Transport(message) => Error::Communication(message),
        err if err.is_rate_limited() => Error::RateLimitExceeded,
        err => Error::Api(err.details()),
    }
}

/// Runs `action` until it succeeds, fails for a reason other than rate
/// limiting, or `policy.max_attempts` attempts are used up.
///
/// `sleep` is awaited between attempts and never after the last one.
pub async fn execute_with_retry<T, A, AF, S, SF>(
    mut action: A,
    policy: RetryPolicy,
    mut sleep: S,
) -> Res<T>
where
    A: FnMut() -> AF,
    AF: Future<Output = Result<T, Failure>>,
    S: FnMut(Duration) -> SF,
    SF: Future<Output = ()>,
{
    for attempt in 0..policy.max_attempts {
        match action().await {
            Ok(value) => return Ok(value),
            Err(Failure::Fatal(err)) => return Err(err),
            Err(Failure::Upstream(err)) if err.is_rate_limited() => {
                if attempt + 1 < policy.max_attempts {
                    let delay = policy.delay_for(attempt);
                    warning!(
                        "Rate limited by Reddit, retrying in {}s ({}/{})",
                        delay.as_secs_f64(),
                        attempt + 1,
                        policy.max_attempts
                    );
                    sleep(delay).await;
                    continue;
                }
                return Err(Error::RateLimitExceeded);
            }
            Err(Failure::Upstream(err)) => return Err(classify(err)),
        }
    }

    Err(Error::RetryExhausted)
}

/// [`execute_with_retry`] sleeping on the tokio timer.
pub async fn retry_with_backoff<T, A, AF>(action: A, policy: RetryPolicy) -> Res<T>
where
    A: FnMut() -> AF,
    AF: Future<Output = Result<T, Failure>>,
{
    execute_with_retry(action, policy, tokio::time::sleep).await
}
