//! Bounded retry around token acquisition.

use std::time::Duration;

use tracing::{info, warn};

use super::{AccessToken, TokenError, TokenProvider};

/// How often and how patiently to retry a transient token failure.
///
/// The delay is fixed; there is no backoff growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, the first one included.
    pub max_attempts: u32,
    /// Pause before each retry.
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
        Self::new(3, Duration::from_secs(3))
    }
}

/// Acquire a token for `resource`, retrying only transient authority errors.
///
/// The pause is a `tokio::time::sleep`, so only the calling request waits.
pub async fn acquire_with_retry(
    provider: &dyn TokenProvider,
    resource: &str,
    policy: &RetryPolicy,
) -> Result<AccessToken, TokenError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match provider.acquire_token(resource).await {
            Ok(token) => {
                if attempt > 1 {
                    info!(attempt, "access token acquired after retry");
                }
                return Ok(token);
            }
            Err(err) if err.is_transient() && attempt < max_attempts => {
                warn!(
                    attempt,
                    max_attempts,
                    delay = ?policy.delay,
                    "token authority temporarily unavailable, retrying"
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(err) => {
                warn!(attempt, error = %err, "token acquisition failed");
                return Err(err);
            }
        }
    }
}
