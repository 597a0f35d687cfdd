//! Retry policy with exponential backoff for provider requests.
//!
//! Backoff doubles per attempt (`initial * 2^attempt`) and is capped at
//! the configured maximum; there is no jitter — a single adapter instance
//! is already serialized by the request spacer. Only transient errors are
//! retried; fatal errors propagate immediately.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use super::error::ProviderError;
use crate::domain::models::RetryConfig;

/// Bounded exponential-backoff retry policy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts after the initial try.
    max_retries: u32,
    /// Initial backoff duration in milliseconds.
    initial_backoff_ms: u64,
    /// Maximum backoff duration in milliseconds.
    max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    /// Recommended defaults: 3 retries, 10 s initial backoff, 5 min cap.
    fn default() -> Self {
        Self::new(3, 10_000, 300_000)
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_retries, config.initial_backoff_ms, config.max_backoff_ms)
    }
}

impl RetryPolicy {
    pub const fn new(max_retries: u32, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            max_retries,
            initial_backoff_ms,
            max_backoff_ms,
        }
    }

    /// Execute an operation, retrying transient failures with backoff.
    ///
    /// Fatal errors and errors after the attempt cap are returned as-is.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => {
                    if attempt > 0 {
                        debug!(attempt, "operation succeeded after retries");
                    }
                    return Ok(result);
                }
                Err(err) => {
                    if !self.should_retry(&err, attempt) {
                        if attempt >= self.max_retries {
                            warn!(attempts = attempt + 1, error = %err, "giving up after retries");
                        } else {
                            debug!(error = %err, "fatal error, not retrying");
                        }
                        return Err(err);
                    }

                    let backoff = self.calculate_backoff(attempt);
                    warn!(
                        attempt = attempt + 1,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %err,
                        "transient error, backing off before retry"
                    );

                    sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Backoff for a 0-indexed attempt: `min(initial * 2^attempt, max)`.
    fn calculate_backoff(&self, attempt: u32) -> Duration {
        let backoff_ms = self
            .initial_backoff_ms
            .saturating_mul(2_u64.saturating_pow(attempt))
            .min(self.max_backoff_ms);

        Duration::from_millis(backoff_ms)
    }

    fn should_retry(&self, error: &ProviderError, attempt: u32) -> bool {
        attempt < self.max_retries && error.is_transient()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn server_error() -> ProviderError {
        ProviderError::ServerError(StatusCode::INTERNAL_SERVER_ERROR, "down".to_string())
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy::new(5, 1_000, 60_000);

        assert_eq!(policy.calculate_backoff(0), Duration::from_millis(1_000));
        assert_eq!(policy.calculate_backoff(1), Duration::from_millis(2_000));
        assert_eq!(policy.calculate_backoff(2), Duration::from_millis(4_000));
        assert_eq!(policy.calculate_backoff(5), Duration::from_millis(32_000));
        assert_eq!(policy.calculate_backoff(6), Duration::from_millis(60_000));
        assert_eq!(policy.calculate_backoff(60), Duration::from_millis(60_000));
    }

    #[test]
    fn retries_transient_until_the_cap() {
        let policy = RetryPolicy::new(3, 1_000, 60_000);

        assert!(policy.should_retry(&ProviderError::RateLimitExceeded, 0));
        assert!(policy.should_retry(&ProviderError::Timeout, 2));
        assert!(!policy.should_retry(&ProviderError::RateLimitExceeded, 3));
    }

    #[test]
    fn never_retries_fatal_errors() {
        let policy = RetryPolicy::new(3, 1_000, 60_000);

        assert!(!policy.should_retry(&ProviderError::InvalidRequest("bad".to_string()), 0));
        assert!(!policy.should_retry(&ProviderError::AuthenticationFailed("key".to_string()), 0));
    }

    #[tokio::test(start_paused = true)]
    async fn execute_succeeds_immediately() {
        let policy = RetryPolicy::default();
        let calls = Arc::new(AtomicU32::new(0));

        let result = policy
            .execute(|| {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ProviderError>(42)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn execute_retries_transient_then_succeeds() {
        let policy = RetryPolicy::new(3, 100, 1_000);
        let calls = Arc::new(AtomicU32::new(0));

        let result = policy
            .execute(|| {
                let calls = Arc::clone(&calls);
                async move {
                    if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(ProviderError::RateLimitExceeded)
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn execute_fails_fast_on_fatal_error() {
        let policy = RetryPolicy::new(3, 100, 1_000);
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), _> = policy
            .execute(|| {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(ProviderError::AuthenticationFailed("bad key".to_string()))
                }
            })
            .await;

        assert!(matches!(result, Err(ProviderError::AuthenticationFailed(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn execute_gives_up_after_max_retries() {
        let policy = RetryPolicy::new(2, 100, 1_000);
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), _> = policy
            .execute(|| {
                let calls = Arc::clone(&calls);
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(server_error())
                }
            })
            .await;

        assert!(matches!(result, Err(ProviderError::ServerError(_, _))));
        // Initial attempt plus two retries.
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
