//! Retry policy for model backend calls.
//!
//! An explicit policy object (attempts + backoff curve) applied uniformly
//! by the gateway, instead of sleeps inlined in the call path. Only
//! transient errors are retried; anything else propagates on first sight.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::GatewayError;

/// Bounded retry with exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles each retry
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        // 3 attempts, 0.5s then 1.0s between them
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Delay to sleep after the given failed attempt (0-based).
    /// Returns None once attempts are exhausted.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if attempt + 1 >= self.max_attempts {
            return None;
        }
        Some(self.base_delay * 2u32.pow(attempt))
    }
}

/// Run `op` under the policy. Transient failures sleep and retry until
/// attempts run out; the final failure propagates unchanged.
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, GatewayError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GatewayError>>,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() => match policy.delay_after(attempt) {
                Some(delay) => {
                    warn!(
                        "Transient backend failure (attempt {}/{}), retrying in {:?}: {}",
                        attempt + 1,
                        policy.max_attempts,
                        delay,
                        err
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                None => return Err(err),
            },
            Err(err) => return Err(err),
        }
    }
}
