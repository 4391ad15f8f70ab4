// src/api/retry.rs
// =============================================================================
// Retrying idempotent reads with exponential backoff.
//
// How it works:
// 1. Run the operation
// 2. If it fails with a 4xx, give up immediately (the request is wrong,
//    sending it again won't fix it)
// 3. Otherwise wait base_delay * 2^attempt and try again
// 4. After max_retries attempts, return the last error as-is
//
// Only GET-style calls go through here. Creating, updating or deleting is
// sent exactly once, because repeating a write can repeat its side effects.
//
// Rust concepts:
// - Generic async functions: F is any closure that produces a future
// - FnMut: the closure is called again for each attempt
// =============================================================================

use crate::api::error::RequestError;
use std::future::Future;
use std::time::Duration;

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_retries: u32,
    /// Wait before the second attempt; doubles after that
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Delay after the failed attempt with this (0-based) index
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Runs `operation` under this policy.
    pub async fn run<F, Fut, T>(&self, mut operation: F) -> Result<T, RequestError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, RequestError>>,
    {
        // Zero attempts would leave us with no error to return
        let attempts = self.max_retries.max(1);
        let mut attempt = 0;

        loop {
            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if error.is_client_error() {
                return Err(error);
            }

            if attempt + 1 >= attempts {
                return Err(error);
            }

            let delay = self.delay_for(attempt);
            tracing::warn!(
                attempt = attempt + 1,
                max_attempts = attempts,
                delay_ms = delay.as_millis() as u64,
                status = error.status_code,
                kind = %error.kind,
                "Request failed, retrying"
            );

            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/// Retries `operation` up to `max_retries` times with exponential backoff.
///
/// Client errors (4xx) are returned on the first occurrence. Everything else
/// is retried; when attempts run out the last error is returned unchanged.
pub async fn retry_request<F, Fut, T>(
    operation: F,
    max_retries: u32,
    base_delay: Duration,
) -> Result<T, RequestError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RequestError>>,
{
    RetryPolicy::new(max_retries, base_delay).run(operation).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    fn server_error(status: u16) -> RequestError {
        RequestError::new(status, "ServerError", "try later", None)
    }

    #[test]
    fn test_delays_double() {
        let policy = RetryPolicy::new(4, Duration::from_millis(100));
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 3);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_errors_are_not_retried() {
        for status in [400u16, 401, 404, 409, 422, 429, 499] {
            let calls = AtomicU32::new(0);
            let result: Result<(), _> = retry_request(
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async move { Err(RequestError::new(status, "ClientError", "bad", None)) }
                },
                3,
                Duration::from_millis(1000),
            )
            .await;

            assert_eq!(result.unwrap_err().status_code, status);
            assert_eq!(calls.load(Ordering::SeqCst), 1, "status {}", status);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_errors_exhaust_attempts_and_return_last() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result: Result<(), _> = retry_request(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    Err(RequestError::new(500, "ServerError", format!("attempt {}", n), None))
                }
            },
            3,
            Duration::from_millis(1000),
        )
        .await;

        let error = result.unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(error.message, "attempt 2");
        // 1000 + 2000, nothing after the last attempt
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(3000), "{:?}", elapsed);
        assert!(elapsed < Duration::from_millis(4000), "{:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result = retry_request(
            || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 3 {
                        Err(server_error(503))
                    } else {
                        Ok("done")
                    }
                }
            },
            4,
            Duration::from_millis(100),
        )
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        // 100 + 200 + 400
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(700), "{:?}", elapsed);
        assert!(elapsed < Duration::from_millis(800), "{:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_network_timeout_and_unknown_are_retried() {
        for error in [
            RequestError::network(),
            RequestError::timeout(),
            RequestError::unknown("boom"),
        ] {
            let calls = AtomicU32::new(0);
            let result: Result<(), _> = retry_request(
                || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    let error = error.clone();
                    async move { Err(error) }
                },
                3,
                Duration::from_millis(10),
            )
            .await;

            assert_eq!(result.unwrap_err(), error);
            assert_eq!(calls.load(Ordering::SeqCst), 3);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_still_tries_once() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_request(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(server_error(500)) }
            },
            0,
            Duration::from_millis(10),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
