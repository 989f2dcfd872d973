//! Retry logic utilities for artifact downloads
//!
//! Exponential backoff and timeout helpers used by the HTTP downloader.

use crate::errors::{FetchError, FetchResult};
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

/// Calculate next backoff duration using exponential backoff with a maximum cap
///
/// `new_backoff = min(current_backoff * multiplier, max_backoff)`
///
/// # Example
/// ```
/// use std::time::Duration;
/// use program_fixtures::artifacts::calculate_next_backoff;
///
/// let backoff = Duration::from_millis(100);
/// let next = calculate_next_backoff(backoff, 2.0, 30);
/// assert_eq!(next, Duration::from_millis(200));
/// ```
pub fn calculate_next_backoff(
    current_backoff: Duration,
    multiplier: f64,
    max_backoff_seconds: u64,
) -> Duration {
    Duration::from_millis((current_backoff.as_millis() as f64 * multiplier) as u64)
        .min(Duration::from_secs(max_backoff_seconds))
}

/// Run a download step under a timeout, mapping expiry to [`FetchError::Timeout`]
pub async fn execute_with_timeout<T, F>(timeout_seconds: u64, url: &str, operation: F) -> FetchResult<T>
where
    F: Future<Output = FetchResult<T>>,
{
    match timeout(Duration::from_secs(timeout_seconds), operation).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            timeout_seconds,
            url: url.to_string(),
        }),
    }
}

/// Whether a failed attempt is worth repeating
///
/// Transport failures, timeouts and server-side errors are transient; client
/// errors (404 for an unknown release, 403) and local failures are not.
pub fn is_retryable(error: &FetchError) -> bool {
    match error {
        FetchError::Http { .. } | FetchError::Timeout { .. } => true,
        FetchError::Status { status, .. } => *status >= 500 || *status == 429,
        _ => false,
    }
}
