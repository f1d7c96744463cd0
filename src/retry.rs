//! Caller-side retry with exponential backoff.
//!
//! The scrape cycle itself never retries; adapters that want resilience
//! wrap it in a policy from here.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

/// How many times to re-run an operation and how long to wait in between.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles each attempt.
    pub base_delay: Duration,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Policy for fetches against the source site.
    pub fn network() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }

    /// Run one attempt and never retry.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let delay = self.base_delay.saturating_mul(2u32.saturating_pow(attempt));
        delay.min(self.max_delay)
    }
}

/// Run `operation` until it succeeds or the policy is exhausted, returning
/// the last error.
pub async fn with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    name: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("{name} succeeded after {attempt} retries");
                }
                return Ok(value);
            }
            Err(e) if attempt < policy.max_retries => {
                let delay = policy.backoff(attempt);
                attempt += 1;
                warn!(
                    "{name} failed (attempt {attempt}/{}): {e}. Retrying in {delay:?}",
                    policy.max_retries + 1,
                );
                sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
