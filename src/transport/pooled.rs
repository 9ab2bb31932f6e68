//! Pooled HTTP backend using reqwest.

use std::time::Duration;

use super::{HttpResponse, SignedRequest, Transport, TransportError, TransportOptions};
use crate::error::TimeoutStage;

/// Connection-pooling backend using reqwest.
///
/// A thin wrapper around `reqwest::Client` that implements [`Transport`].
/// Connections to the API host are kept alive and reused across calls, which
/// suits high-throughput use. The pool is internally synchronized, so
/// concurrent calls run their exchanges in parallel.
///
/// Redirects are never followed.
///
/// # Example
///
/// ```no_run
/// use wallee_sdk::transport::{PooledTransport, TransportOptions};
///
/// let transport = PooledTransport::new(&TransportOptions::default()).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct PooledTransport {
    inner: reqwest::Client,
}

impl PooledTransport {
    /// Creates a pooled backend from the given options.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Setup`] if the TLS backend cannot be initialized.
    pub fn new(options: &TransportOptions) -> Result<Self, TransportError> {
        let inner = reqwest::Client::builder()
            .connect_timeout(options.connect_timeout)
            .pool_max_idle_per_host(options.pool_max_idle_per_host)
            .pool_idle_timeout(options.pool_idle_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| TransportError::Setup(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { inner })
    }

    /// Creates a backend from an existing reqwest client.
    ///
    /// The caller is responsible for disabling redirects on `client`.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Transport for PooledTransport {
    async fn send(
        &self,
        req: &SignedRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        // Build the reqwest request
        let mut builder = self
            .inner
            .request(req.method().clone(), req.url().as_str())
            .timeout(timeout);

        // Add headers
        for (name, value) in req.headers() {
            builder = builder.header(name, value);
        }

        // Add body if present
        if let Some(body) = req.body() {
            builder = builder.body(body.clone());
        }

        // Send the request
        let response = builder.send().await.map_err(map_reqwest_error)?;

        // Extract response parts
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(map_reqwest_error)?
            .to_vec();

        Ok(HttpResponse::new(status, headers, body))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        let stage = if e.is_connect() {
            TimeoutStage::Connect
        } else {
            TimeoutStage::Response
        };
        TransportError::Timeout(stage)
    } else if e.is_builder() {
        TransportError::InvalidRequest(e.to_string())
    } else if e.is_connect() {
        TransportError::from_connect(Box::new(e))
    } else if super::error::is_tls_failure(&e) {
        TransportError::Tls(Box::new(e))
    } else {
        TransportError::Connection(Box::new(e))
    }
}
