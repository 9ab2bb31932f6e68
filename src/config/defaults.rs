//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default API endpoint.
pub const BASE_URL: &str = "https://app-wallee.com";

/// Default API version segment.
pub const API_VERSION: &str = "v2.0";

/// Default HTTP backend name.
pub const BACKEND: &str = "pooled";

/// Default connect timeout in seconds.
pub const CONNECT_TIMEOUT_SECS: u64 = 20;

/// Default response timeout in seconds.
pub const READ_TIMEOUT_SECS: u64 = 25;

/// Default idle connections kept per host by the pooled backend.
pub const POOL_MAX_IDLE_PER_HOST: usize = 8;

/// Default maximum number of attempts, the first one included.
pub const RETRY_MAX_ATTEMPTS: u32 = 3;

/// Default initial retry delay in milliseconds.
pub const RETRY_INITIAL_DELAY_MS: u64 = 500;

/// Default maximum retry delay in milliseconds.
pub const RETRY_MAX_DELAY_MS: u64 = 10_000;

/// Default retry backoff multiplier.
pub const RETRY_MULTIPLIER: f64 = 2.0;

/// Environment variable holding the base64 shared secret.
pub const SECRET_ENV: &str = "WALLEE_SECRET";

/// Default connect timeout as Duration.
#[must_use]
pub const fn connect_timeout() -> Duration {
    Duration::from_secs(CONNECT_TIMEOUT_SECS)
}

/// Default response timeout as Duration.
#[must_use]
pub const fn read_timeout() -> Duration {
    Duration::from_secs(READ_TIMEOUT_SECS)
}

/// Default initial retry delay as Duration.
#[must_use]
pub const fn retry_initial_delay() -> Duration {
    Duration::from_millis(RETRY_INITIAL_DELAY_MS)
}

/// Default maximum retry delay as Duration.
#[must_use]
pub const fn retry_max_delay() -> Duration {
    Duration::from_millis(RETRY_MAX_DELAY_MS)
}
