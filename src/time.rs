//! Time abstraction for testability.
//!
//! This module provides a [`Clock`] trait for reading the wall clock when
//! stamping signed requests, and a [`Sleeper`] trait for retry backoff.
//! Both can be replaced in tests so nothing depends on real time.

use std::future::Future;
use std::time::{Duration, SystemTime};

/// Abstraction over system time for testability.
///
/// Implementations provide the current time, allowing tests to inject
/// controlled time values instead of relying on actual system time.
///
/// # Example
///
/// ```
/// use wallee_sdk::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now >= std::time::SystemTime::UNIX_EPOCH);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;

    /// Returns the current time as milliseconds since the Unix epoch.
    ///
    /// Pre-epoch clocks report 0.
    fn epoch_millis(&self) -> u64 {
        self.now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// Production clock using actual system time.
///
/// This is the default clock implementation that delegates to
/// [`SystemTime::now()`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Abstraction over asynchronous sleeping.
///
/// Retry backoff goes through this trait so tests can run the retry loop
/// without waiting.
pub trait Sleeper: Send + Sync {
    /// Suspends the current task for `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Production sleeper backed by [`tokio::time::sleep`].
///
/// Only the calling task is suspended; other calls on the same runtime
/// keep making progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sleeper that returns immediately.
///
/// Useful for tests and for callers that drive their own pacing.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {}
}
