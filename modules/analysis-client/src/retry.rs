use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::Result;

/// Backoff policy for throttled calls. Delay before retry `n` (0-based)
/// is `initial_delay * 2^n`, so delays strictly increase.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(2000),
        }
    }
}

impl RetryPolicy {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_delay * 2u32.pow(attempt)
    }
}

/// Run `op`, retrying only on rate-limit signals. Any other failure
/// propagates immediately. Total attempts never exceed `max_retries + 1`.
pub async fn call_with_backoff<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_rate_limited() && attempt < policy.max_retries => {
                let delay = policy.delay_for(attempt);
                warn!(
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Rate limited, retrying after backoff"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
