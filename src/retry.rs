//! Predicate-driven retry with exponential backoff
//!
//! The fetch stage re-invokes the release listing while the result fails a
//! success predicate (an empty list), up to a bounded number of extra
//! attempts. Backoff between attempts is exponential with optional jitter.
//!
//! After the attempt budget is exhausted the last result is returned as-is:
//! a final unsatisfying `Ok` value goes back to the caller for its own
//! handling, and a final error is propagated.
//!
//! # Example
//!
//! ```no_run
//! use radarr_autograb::config::RetryConfig;
//! use radarr_autograb::retry::retry_until;
//! use radarr_autograb::error::Error;
//!
//! # async fn example() -> Result<(), Error> {
//! let config = RetryConfig::default();
//! let releases = retry_until(
//!     &config,
//!     || async { Ok::<_, Error>(vec!["candidate"]) },
//!     |list| !list.is_empty(),
//! )
//! .await?;
//! # Ok(())
//! # }
//! ```

use crate::config::RetryConfig;
use crate::error::Error;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

/// Trait for errors that can be classified as retryable or not
///
/// Transient failures (network timeouts, connection resets) should return
/// `true`. Permanent failures (bad configuration, rejected requests) should
/// return `false`.
pub trait IsRetryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for Error {
    fn is_retryable(&self) -> bool {
        match self {
            // Network errors are retryable when they are timeouts or
            // connection-level failures
            Error::Network(e) => e.is_timeout() || e.is_connect(),
            // A non-2xx listing response may be a transient Radarr hiccup
            Error::Fetch { .. } => true,
            // Selection and grab failures are decisions, not transport faults
            Error::NoSuitableRelease | Error::GrabRejected { .. } | Error::Grab { .. } => false,
            // Malformed payloads and bad configuration are permanent
            Error::Serialization(_) | Error::Config { .. } => false,
        }
    }
}

/// Re-invoke an async operation until its result satisfies a predicate
///
/// # Arguments
///
/// * `config` - Retry policy (extra attempts, delays, backoff multiplier, jitter)
/// * `operation` - Async closure returning `Result<T, E>` where `E: IsRetryable`
/// * `is_success` - Predicate deciding whether an `Ok` value counts as success
///
/// # Returns
///
/// The first satisfying `Ok` value; otherwise the last result once the
/// attempt budget is spent. Non-retryable errors are returned immediately.
pub async fn retry_until<F, Fut, T, E, P>(
    config: &RetryConfig,
    mut operation: F,
    mut is_success: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Display,
    P: FnMut(&T) -> bool,
{
    let mut attempt: u32 = 0;
    let mut delay = config.initial_delay;

    loop {
        match operation().await {
            Ok(value) => {
                if is_success(&value) {
                    if attempt > 0 {
                        tracing::info!(attempts = attempt + 1, "operation succeeded after retry");
                    }
                    return Ok(value);
                }
                if attempt >= config.max_attempts {
                    tracing::warn!(
                        attempts = attempt + 1,
                        "result never satisfied the success predicate"
                    );
                    return Ok(value);
                }
                attempt += 1;
                tracing::warn!(
                    attempt = attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "result did not satisfy the success predicate, retrying"
                );
            }
            Err(e) => {
                if !e.is_retryable() {
                    tracing::error!(error = %e, "operation failed with non-retryable error");
                    return Err(e);
                }
                if attempt >= config.max_attempts {
                    tracing::error!(
                        error = %e,
                        attempts = attempt + 1,
                        "operation failed after all retry attempts exhausted"
                    );
                    return Err(e);
                }
                attempt += 1;
                tracing::warn!(
                    error = %e,
                    attempt = attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "operation failed, retrying"
                );
            }
        }

        let jittered_delay = if config.jitter { add_jitter(delay) } else { delay };
        tokio::time::sleep(jittered_delay).await;

        let next_delay = Duration::from_secs_f64(delay.as_secs_f64() * config.backoff_multiplier);
        delay = next_delay.min(config.max_delay);
    }
}

/// Add random jitter to a delay to prevent thundering herd
///
/// Jitter is uniformly distributed between 0% and 100% of the delay, so the
/// actual delay falls between `delay` and `2 * delay`.
fn add_jitter(delay: Duration) -> Duration {
    let mut rng = rand::thread_rng();
    let jitter_factor: f64 = rng.gen_range(0.0..=1.0);
    let jittered_secs = delay.as_secs_f64() * (1.0 + jitter_factor);
    Duration::from_secs_f64(jittered_secs)
}
