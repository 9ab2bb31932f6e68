//! Retry policy for API calls.

use std::time::Duration;

use crate::config::defaults;
use crate::error::{ApiError, TimeoutStage};

/// Configuration for exponential backoff retry behavior.
///
/// Controls how many times a failed call is attempted and how long to wait
/// between attempts. The policy itself is stateless: the caller passes the
/// attempt number and the failure, and gets a [`RetryDecision`] back.
///
/// # Defaults
///
/// - `max_attempts`: 3
/// - `initial_delay`: 500 milliseconds
/// - `max_delay`: 10 seconds
/// - `multiplier`: 2.0
///
/// # Example
///
/// ```
/// use wallee_sdk::client::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_attempts(5)
///     .with_initial_delay(Duration::from_millis(200))
///     .with_max_delay(Duration::from_secs(5))
///     .with_multiplier(1.5);
/// assert_eq!(policy.delay_for_retry(0), Duration::from_millis(200));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial attempt).
    ///
    /// A value of 1 means no retries; only the initial attempt is made.
    pub max_attempts: u32,

    /// Delay before the first retry.
    ///
    /// Subsequent delays are computed by multiplying by `multiplier`.
    pub initial_delay: Duration,

    /// Maximum delay between retries, server hints included.
    pub max_delay: Duration,

    /// Multiplier applied to the delay after each retry.
    pub multiplier: f64,
}

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait this long, then try again.
    RetryAfter(Duration),
    /// Surface the error.
    GiveUp,
}

impl RetryPolicy {
    /// Default maximum attempts.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = defaults::RETRY_MAX_ATTEMPTS;

    /// Default initial delay (500 milliseconds).
    pub const DEFAULT_INITIAL_DELAY: Duration = defaults::retry_initial_delay();

    /// Default maximum delay (10 seconds).
    pub const DEFAULT_MAX_DELAY: Duration = defaults::retry_max_delay();

    /// Default multiplier (2.0).
    pub const DEFAULT_MULTIPLIER: f64 = defaults::RETRY_MULTIPLIER;

    /// Minimum value for `max_attempts`.
    pub const MIN_MAX_ATTEMPTS: u32 = 1;

    /// Creates a new retry policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            initial_delay: Self::DEFAULT_INITIAL_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
            multiplier: Self::DEFAULT_MULTIPLIER,
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self::new().with_max_attempts(1)
    }

    /// Sets the maximum number of attempts.
    ///
    /// # Panics
    ///
    /// Panics if `max_attempts` is less than 1.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        assert!(
            max_attempts >= Self::MIN_MAX_ATTEMPTS,
            "max_attempts must be at least 1"
        );
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the initial delay between retries.
    ///
    /// Zero delay is supported (useful for testing with [`InstantSleeper`])
    /// but creates a tight retry loop in production.
    ///
    /// [`InstantSleeper`]: crate::time::InstantSleeper
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the maximum delay between retries.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the delay multiplier.
    ///
    /// # Panics
    ///
    /// Panics if `multiplier` is not greater than 1.0; delays must grow
    /// from one retry to the next.
    #[must_use]
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        assert!(multiplier > 1.0, "multiplier must be greater than 1.0");
        self.multiplier = multiplier;
        self
    }

    /// Computes the delay for a given retry number (0-indexed).
    ///
    /// Retry 0 is the wait before the second attempt. The result is capped
    /// at `max_delay`.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        if self.initial_delay.is_zero() {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let delay_secs = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        let capped = delay_secs.min(self.max_delay.as_secs_f64());
        Duration::try_from_secs_f64(capped).unwrap_or(self.max_delay)
    }

    /// Returns true if another attempt may follow attempt number `attempt`
    /// (1 = first attempt).
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Decides whether to retry after attempt number `attempt` failed with
    /// `error`.
    ///
    /// Only transient failures are retried. A server `Retry-After` hint
    /// lengthens the wait but never beyond `max_delay`.
    #[must_use]
    pub fn decide(&self, attempt: u32, error: &ApiError) -> RetryDecision {
        if !error.is_retryable() || !self.should_retry(attempt) {
            return RetryDecision::GiveUp;
        }

        let backoff = self.delay_for_retry(attempt.saturating_sub(1));
        let delay = error
            .retry_after()
            .map_or(backoff, |hint| hint.max(backoff))
            .min(self.max_delay);
        RetryDecision::RetryAfter(delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Extension trait for checking if an error is retryable.
///
/// Determines whether an error represents a transient failure that
/// warrants another attempt.
pub trait IsRetryable {
    /// Returns true if the error is potentially transient and should be retried.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for ApiError {
    fn is_retryable(&self) -> bool {
        match self {
            // Network errors are typically transient
            Self::Connection(_)
            | Self::Timeout(TimeoutStage::Connect | TimeoutStage::Response)
            | Self::Server { .. } => true,
            Self::Client(failure) => {
                failure.is_rate_limited() || failure.status == http::StatusCode::REQUEST_TIMEOUT
            }
            Self::Tls(_)
            | Self::Timeout(TimeoutStage::Deadline)
            | Self::Protocol(_)
            | Self::Validation(_)
            | Self::InvalidRequest(_) => false,
        }
    }
}
