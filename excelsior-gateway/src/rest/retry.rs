//! Retry policy with exponential backoff.
//!
//! Transient failures (server errors, rate limits, network faults) are
//! re-attempted under a bounded exponential-backoff loop; everything else
//! fails fast on the first attempt. The backoff sleep is a plain
//! `tokio::time::sleep`, so a retrying call never blocks unrelated tasks
//! and cancellation (dropping the future) aborts promptly.
//!
//! # Example
//!
//! ```ignore
//! use excelsior_gateway::rest::RetryPolicy;
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::new()
//!     .with_max_retries(5)
//!     .with_base_delay(Duration::from_millis(500));
//!
//! let value = policy.run(|| async { fetch_page().await }).await?;
//! ```

use excelsior_core::error::{ApiError, ErrorKind};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Bounded exponential-backoff retry policy.
///
/// `max_retries = 0` means exactly one attempt and no retries. The delay
/// before retry `n+1` is `min(base_delay * backoff_factor^n, max_delay)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
    backoff_factor: f64,
    retry_on: Vec<ErrorKind>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            backoff_factor: 2.0,
            retry_on: vec![ErrorKind::ServerError, ErrorKind::RateLimit, ErrorKind::Network],
        }
    }
}

impl RetryPolicy {
    /// Creates a policy with the default knobs (3 retries, 1s base delay,
    /// 60s cap, factor 2.0, retrying server/rate-limit/network failures).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of retries after the initial attempt.
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the delay before the first retry.
    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the upper bound on the backoff delay.
    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the backoff multiplier.
    #[must_use]
    pub fn with_backoff_factor(mut self, factor: f64) -> Self {
        self.backoff_factor = factor;
        self
    }

    /// Replaces the set of error kinds that are retried.
    #[must_use]
    pub fn with_retry_on(mut self, kinds: Vec<ErrorKind>) -> Self {
        self.retry_on = kinds;
        self
    }

    /// Returns the maximum number of retries.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns true if failures of the given kind are retried.
    #[must_use]
    pub fn retries_kind(&self, kind: ErrorKind) -> bool {
        self.retry_on.contains(&kind)
    }

    /// Runs an operation under the retry loop.
    ///
    /// The operation is re-invoked from scratch on every attempt, so any
    /// per-attempt work (signing in particular) is redone each time. On
    /// success the result is returned immediately; a non-retryable failure
    /// is propagated without sleeping; once the retry budget is exhausted
    /// the most recent error is propagated.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, ApiError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let mut attempt = 0u32;
        let mut delay = self.base_delay;

        loop {
            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if !self.retries_kind(error.kind) {
                return Err(error);
            }

            if attempt == self.max_retries {
                warn!(
                    attempts = attempt + 1,
                    kind = %error.kind,
                    "Retry budget exhausted"
                );
                return Err(error);
            }

            warn!(
                attempt = attempt + 1,
                delay_ms = delay.as_millis(),
                kind = %error.kind,
                error = %error,
                "Transient failure, retrying"
            );

            tokio::time::sleep(delay).await;
            delay = self.next_delay(delay);
            attempt += 1;
        }
    }

    fn next_delay(&self, delay: Duration) -> Duration {
        let next = delay.as_secs_f64() * self.backoff_factor;
        Duration::from_secs_f64(next.min(self.max_delay.as_secs_f64()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    fn server_error() -> ApiError {
        ApiError::from_status(500, None, None, None)
    }

    fn counting_op(
        attempts: &Arc<AtomicU32>,
        failures_before_success: u32,
    ) -> impl FnMut() -> std::pin::Pin<Box<dyn Future<Output = Result<u32, ApiError>> + Send>> {
        let attempts = Arc::clone(attempts);
        move || {
            let attempts = Arc::clone(&attempts);
            Box::pin(async move {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                if n < failures_before_success {
                    Err(server_error())
                } else {
                    Ok(n + 1)
                }
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_failures_then_success() {
        let policy = RetryPolicy::new();
        let attempts = Arc::new(AtomicU32::new(0));
        let started = Instant::now();

        let result = policy.run(counting_op(&attempts, 2)).await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        // Two backoff sleeps: 1s + 2s.
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_fails_fast() {
        let policy = RetryPolicy::new();
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_in_op = Arc::clone(&attempts);
        let started = Instant::now();

        let result: Result<u32, ApiError> = policy
            .run(move || {
                let attempts = Arc::clone(&attempts_in_op);
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err(ApiError::from_status(404, None, None, None))
                }
            })
            .await;

        assert_eq!(result.unwrap_err().kind, ErrorKind::NotFound);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_budget_exhaustion_surfaces_last_error() {
        let policy = RetryPolicy::new().with_max_retries(2);
        let attempts = Arc::new(AtomicU32::new(0));

        let result = policy.run(counting_op(&attempts, u32::MAX)).await;

        assert_eq!(result.unwrap_err().kind, ErrorKind::ServerError);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_means_single_attempt() {
        let policy = RetryPolicy::new().with_max_retries(0);
        let attempts = Arc::new(AtomicU32::new(0));
        let started = Instant::now();

        let result = policy.run(counting_op(&attempts, u32::MAX)).await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_sequence_doubles() {
        let policy = RetryPolicy::new().with_max_retries(5);
        let attempts = Arc::new(AtomicU32::new(0));
        let started = Instant::now();

        let result = policy.run(counting_op(&attempts, u32::MAX)).await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 6);
        // Sleeps are 1 + 2 + 4 + 8 + 16 seconds.
        assert_eq!(started.elapsed(), Duration::from_secs(31));
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_caps_at_max_delay() {
        let policy = RetryPolicy::new()
            .with_max_retries(5)
            .with_backoff_factor(10.0)
            .with_max_delay(Duration::from_secs(5));
        let attempts = Arc::new(AtomicU32::new(0));
        let started = Instant::now();

        let result = policy.run(counting_op(&attempts, u32::MAX)).await;

        assert!(result.is_err());
        // Sleeps are 1 + 5 + 5 + 5 + 5 seconds, every sleep capped at 5s.
        assert_eq!(started.elapsed(), Duration::from_secs(21));
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_on_first_attempt_skips_backoff() {
        let policy = RetryPolicy::new();
        let attempts = Arc::new(AtomicU32::new(0));
        let started = Instant::now();

        let result = policy.run(counting_op(&attempts, 0)).await;

        assert_eq!(result.unwrap(), 1);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_retryable_kinds() {
        let policy = RetryPolicy::new()
            .with_max_retries(3)
            .with_retry_on(vec![ErrorKind::Unknown]);
        let attempts = Arc::new(AtomicU32::new(0));

        // ServerError is no longer retryable under this policy.
        let result = policy.run(counting_op(&attempts, u32::MAX)).await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_retries_kind_defaults() {
        let policy = RetryPolicy::new();

        assert!(policy.retries_kind(ErrorKind::ServerError));
        assert!(policy.retries_kind(ErrorKind::RateLimit));
        assert!(policy.retries_kind(ErrorKind::Network));
        assert!(!policy.retries_kind(ErrorKind::Authentication));
        assert!(!policy.retries_kind(ErrorKind::Validation));
    }
}
