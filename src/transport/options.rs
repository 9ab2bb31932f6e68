//! Construction-time settings shared by all backends.

use std::time::Duration;

/// Settings fixed when a backend is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    /// Upper bound for establishing a connection (TCP and TLS).
    pub connect_timeout: Duration,

    /// Idle connections kept per host by the pooled backend.
    ///
    /// Ignored by the socket backend, which never reuses connections.
    pub pool_max_idle_per_host: usize,

    /// How long an idle pooled connection is kept before it is closed.
    pub pool_idle_timeout: Duration,
}

impl TransportOptions {
    /// Default connect timeout (20 seconds).
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(20);

    /// Default idle connections per host.
    pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 8;

    /// Default idle timeout (90 seconds).
    pub const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Creates options with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            pool_max_idle_per_host: Self::DEFAULT_POOL_MAX_IDLE_PER_HOST,
            pool_idle_timeout: Self::DEFAULT_POOL_IDLE_TIMEOUT,
        }
    }

    /// Sets the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the number of idle connections kept per host.
    #[must_use]
    pub const fn with_pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self::new()
    }
}
