//! Retry policy for store reads.
//!
//! Reads that fail with a transient error (pool exhaustion, dropped
//! connection, serialization failure) are retried with exponential backoff
//! and jitter. Writes are never routed through here: retrying an insert
//! after an ambiguous failure could create duplicate rules.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

/// Backoff settings for [`retry_read`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one. `1` disables retries.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubled for each further attempt.
    pub base_delay: Duration,
    /// Upper bound on a single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(50),
            max_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A policy that performs exactly one attempt.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (1-based), with up to 50% jitter.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exp = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(retry.saturating_sub(1)));
        let capped = exp.min(self.max_delay);
        let jitter = rand::rng().random_range(0.5..=1.0);
        capped.mul_f64(jitter)
    }
}

/// Whether `err` is worth retrying.
///
/// Connection-class SQLSTATEs (`08xxx`), admin shutdown (`57P01`),
/// serialization failures (`40001`) and deadlocks (`40P01`) are transient.
pub fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => true,
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| {
                code.starts_with("08") || matches!(&*code, "57P01" | "40001" | "40P01")
            }),
        _ => false,
    }
}

/// Whether `err` means the store could not be reached at all (transient
/// failures plus a closed pool).
pub fn is_store_unavailable(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::PoolClosed) || is_transient(err)
}

/// Run `op`, retrying transient failures according to `policy`.
///
/// The last error is returned once attempts are exhausted; non-transient
/// errors are returned immediately.
pub async fn retry_read<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &'static str,
    mut op: F,
) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts && is_transient(&err) => {
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    operation,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Transient store error, retrying read"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => {
                if is_transient(&err) {
                    tracing::error!(operation, attempt, error = %err, "Store read failed after retries");
                }
                return Err(err);
            }
        }
    }
}
