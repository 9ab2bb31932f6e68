//! Settings of an [`ApiClient`](super::ApiClient).

use std::time::Duration;

use http::HeaderMap;
use url::Url;

use super::RetryPolicy;
use crate::auth::Credentials;
use crate::config::defaults;
use crate::transport::{BackendKind, TransportOptions};

/// Everything needed to build an [`ApiClient`](super::ApiClient).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use wallee_sdk::auth::Credentials;
/// use wallee_sdk::client::ClientConfig;
/// use wallee_sdk::transport::BackendKind;
///
/// let credentials = Credentials::new(512_u64, "FKrO76r5VwJtBrqZawBspljbBNOxp5veKQQkOnZxucQ=").unwrap();
/// let config = ClientConfig::new(credentials)
///     .with_backend(BackendKind::Socket)
///     .with_call_timeout(Duration::from_secs(60));
/// assert_eq!(config.api_version, "v2.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API endpoint; the versioned API root is appended to its path
    pub base_url: Url,
    /// Version segment, e.g. `v2.0`
    pub api_version: String,
    /// Principal and shared secret
    pub credentials: Credentials,
    /// HTTP backend built by [`ApiClient::from_config`](super::ApiClient::from_config)
    pub backend: BackendKind,
    /// Bound for establishing a connection
    pub connect_timeout: Duration,
    /// Bound for receiving a complete response, per attempt
    pub read_timeout: Duration,
    /// Bound for a whole call, all attempts and backoff included
    pub call_timeout: Option<Duration>,
    /// Retry behavior
    pub retry_policy: RetryPolicy,
    /// Extra headers sent with every request
    pub default_headers: HeaderMap,
    /// Idle connections kept per host by the pooled backend
    pub pool_max_idle_per_host: usize,
}

impl ClientConfig {
    /// Creates a configuration for the default endpoint.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            base_url: default_base_url(),
            api_version: defaults::API_VERSION.to_string(),
            credentials,
            backend: BackendKind::default(),
            connect_timeout: defaults::connect_timeout(),
            read_timeout: defaults::read_timeout(),
            call_timeout: None,
            retry_policy: RetryPolicy::default(),
            default_headers: HeaderMap::new(),
            pool_max_idle_per_host: defaults::POOL_MAX_IDLE_PER_HOST,
        }
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Sets the API version segment.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Selects the HTTP backend.
    #[must_use]
    pub const fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the per-attempt response timeout.
    #[must_use]
    pub const fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Bounds every call, retries included.
    #[must_use]
    pub const fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Sets headers sent with every request.
    #[must_use]
    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    /// Backend settings derived from this configuration.
    #[must_use]
    pub const fn transport_options(&self) -> TransportOptions {
        TransportOptions::new()
            .with_connect_timeout(self.connect_timeout)
            .with_pool_max_idle_per_host(self.pool_max_idle_per_host)
    }
}

fn default_base_url() -> Url {
    Url::parse(defaults::BASE_URL).expect("default base URL is valid")
}
