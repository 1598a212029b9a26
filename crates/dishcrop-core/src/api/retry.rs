//! Retry policy for transient backend failures.

use crate::error::ApiError;
use std::time::Duration;

/// Determine whether an API error is worth retrying.
///
/// Retryable errors: timeouts, connect failures, rate limits (429), server errors (5xx).
/// Non-retryable: validation, client errors, unparsable responses.
pub fn is_retryable(error: &ApiError) -> bool {
    match error {
        ApiError::Request {
            timed_out, connect, ..
        } => *timed_out || *connect,
        ApiError::Status { status, .. } => *status == 429 || (500..=599).contains(status),
        ApiError::Validation(_) | ApiError::Decode { .. } => false,
    }
}

/// Calculate exponential backoff duration for a given attempt.
///
/// Uses `base_delay * 2^attempt` with a cap at 30 seconds.
pub fn backoff_duration(attempt: u32, base_delay_ms: u64) -> Duration {
    let delay = base_delay_ms.saturating_mul(2u64.saturating_pow(attempt));
    Duration::from_millis(delay.min(30_000))
}
