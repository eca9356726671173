//! Retry with exponential backoff
//!
//! Management endpoints are routinely slow to boot and occasionally flaky,
//! so every fetch runs under a bounded retry policy. The backoff schedule
//! matches the tool's historical HTTP stack: no wait before the first
//! retry, then `base * 2^(n-1)` seconds, capped.

use std::time::Duration;

use tracing::debug;

use crate::error::SourceError;

/// Ceiling for a single backoff wait
pub const BACKOFF_MAX_SECS: u64 = 120;

/// Retry policy for a metric source
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retry attempts after the initial request
    pub max_retries: u32,
    /// Base factor for exponential backoff. With 1, waits are 0s, 2s, 4s, 8s, ...
    pub backoff_base_secs: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 10,
            backoff_base_secs: 1,
        }
    }
}

impl RetryPolicy {
    /// Policy with the given retry count and the default backoff base
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Wait before the Nth retry (1-based).
    ///
    /// The first retry fires immediately; after that the wait doubles each
    /// time, capped at [`BACKOFF_MAX_SECS`].
    pub fn retry_delay(&self, retry: u32) -> Duration {
        if retry <= 1 {
            return Duration::ZERO;
        }
        let exp = (retry - 1).min(32);
        let secs = self
            .backoff_base_secs
            .saturating_mul(1u64.checked_shl(exp).unwrap_or(u64::MAX));
        Duration::from_secs(secs.min(BACKOFF_MAX_SECS))
    }
}

/// Run `op` until it succeeds, fails terminally, or the policy is exhausted.
///
/// Retryable failures (see [`SourceError::is_retryable`]) are logged at
/// debug level and retried after the policy's backoff wait. Exhaustion
/// yields [`SourceError::Exhausted`] naming the URL and the last cause.
pub async fn fetch_with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    url: &str,
    mut op: F,
) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, SourceError>>,
{
    let mut last_error: Option<SourceError> = None;

    for attempt in 0..=policy.max_retries {
        if attempt > 0 {
            let delay = policy.retry_delay(attempt);
            debug!(
                url,
                attempt,
                delay_ms = delay.as_millis() as u64,
                "retrying after delay"
            );
            tokio::time::sleep(delay).await;
        }

        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => {
                debug!(url, attempt, error = %e, "request failed, will retry");
                last_error = Some(e);
            }
        }
    }

    Err(SourceError::Exhausted {
        url: url.to_string(),
        attempts: policy.max_retries + 1,
        last_error: last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown error".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tokio::time::Instant;

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            backoff_base_secs: 1,
        }
    }

    #[test]
    fn test_backoff_sequence() {
        let p = policy(10);
        let waits: Vec<u64> = (1..=5).map(|n| p.retry_delay(n).as_secs()).collect();
        assert_eq!(waits, vec![0, 2, 4, 8, 16]);
    }

    #[test]
    fn test_backoff_caps() {
        let p = policy(64);
        assert_eq!(p.retry_delay(8).as_secs(), BACKOFF_MAX_SECS);
        assert_eq!(p.retry_delay(63).as_secs(), BACKOFF_MAX_SECS);
    }

    #[test]
    fn test_backoff_scales_with_base() {
        let p = RetryPolicy {
            max_retries: 5,
            backoff_base_secs: 3,
        };
        assert_eq!(p.retry_delay(1).as_secs(), 0);
        assert_eq!(p.retry_delay(2).as_secs(), 6);
        assert_eq!(p.retry_delay(3).as_secs(), 12);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_first_attempt_no_wait() {
        let start = Instant::now();
        let result = fetch_with_retry(&policy(10), "http://test", || async { Ok(42u32) }).await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_then_succeeds() {
        let calls = Cell::new(0u32);
        let start = Instant::now();

        let result = fetch_with_retry(&policy(10), "http://test", || {
            calls.set(calls.get() + 1);
            let fail = calls.get() <= 3;
            async move {
                if fail {
                    Err(SourceError::Status { status: 503 })
                } else {
                    Ok("ok")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.get(), 4);
        // Waits before retries 1..3: 0s + 2s + 4s
        assert_eq!(start.elapsed(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion() {
        let calls = Cell::new(0u32);
        let start = Instant::now();

        let result: Result<(), _> = fetch_with_retry(&policy(3), "http://test", || {
            calls.set(calls.get() + 1);
            async { Err(SourceError::Status { status: 500 }) }
        })
        .await;

        // Initial attempt + 3 retries, waits 0s + 2s + 4s
        assert_eq!(calls.get(), 4);
        assert_eq!(start.elapsed(), Duration::from_secs(6));
        match result.unwrap_err() {
            SourceError::Exhausted {
                url,
                attempts,
                last_error,
            } => {
                assert_eq!(url, "http://test");
                assert_eq!(attempts, 4);
                assert!(last_error.contains("500"));
            }
            other => panic!("expected Exhausted, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_single_attempt() {
        let calls = Cell::new(0u32);

        let result: Result<(), _> = fetch_with_retry(&policy(0), "http://test", || {
            calls.set(calls.get() + 1);
            async { Err(SourceError::Status { status: 500 }) }
        })
        .await;

        assert_eq!(calls.get(), 1);
        assert!(matches!(
            result.unwrap_err(),
            SourceError::Exhausted { attempts: 1, .. }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_error_stops_immediately() {
        let calls = Cell::new(0u32);

        let result: Result<(), _> = fetch_with_retry(&policy(10), "http://test", || {
            calls.set(calls.get() + 1);
            async { Err(SourceError::Status { status: 401 }) }
        })
        .await;

        assert_eq!(calls.get(), 1);
        assert!(matches!(
            result.unwrap_err(),
            SourceError::Status { status: 401 }
        ));
    }
}
