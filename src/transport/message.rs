//! Signed request, raw response and the transport trait.

use std::time::Duration;

use bytes::Bytes;

use super::TransportError;

/// An HTTP request ready for transmission.
///
/// Produced by [`RequestBuilder`](crate::request::RequestBuilder), which
/// computes the signature over exactly this method and URL. All fields are
/// read-only so nothing can change the request between signing and sending.
/// Transports borrow it; a retry builds and signs a new one.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    method: http::Method,
    url: url::Url,
    headers: http::HeaderMap,
    body: Option<Bytes>,
}

impl SignedRequest {
    pub(crate) const fn new(
        method: http::Method,
        url: url::Url,
        headers: http::HeaderMap,
        body: Option<Bytes>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &http::Method {
        &self.method
    }

    /// Absolute target URL including the query string.
    #[must_use]
    pub const fn url(&self) -> &url::Url {
        &self.url
    }

    /// Headers, including the authentication headers.
    #[must_use]
    pub const fn headers(&self) -> &http::HeaderMap {
        &self.headers
    }

    /// Serialized JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}

/// An HTTP response received from a server.
///
/// Contains the status code, headers, and body of the response.
/// The body is fully buffered into memory.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body (fully buffered)
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as a UTF-8 string, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Parses a `Retry-After` header given in delta-seconds.
    ///
    /// HTTP-date values are ignored.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        self.headers
            .get(http::header::RETRY_AFTER)?
            .to_str()
            .ok()?
            .trim()
            .parse::<u64>()
            .ok()
            .map(Duration::from_secs)
    }
}

/// Trait for executing one HTTP exchange.
///
/// # Design
///
/// This trait abstracts the HTTP backend, enabling:
/// - Choosing a pooled or a single-use connection strategy at construction time
/// - Dependency injection for testing with mock transports
/// - Swapping HTTP libraries without changing calling code
///
/// Implementations must not follow redirects; a 3xx is returned as-is and
/// the decoder treats it as a protocol error.
///
/// # Example
///
/// ```ignore
/// use wallee_sdk::transport::{HttpResponse, SignedRequest, Transport, TransportError};
///
/// struct MockTransport {
///     response: HttpResponse,
/// }
///
/// impl Transport for MockTransport {
///     async fn send(
///         &self,
///         _req: &SignedRequest,
///         _timeout: std::time::Duration,
///     ) -> Result<HttpResponse, TransportError> {
///         Ok(self.response.clone())
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Sends a signed request and returns the raw response.
    ///
    /// `timeout` bounds the wait for the complete response once connected;
    /// the connect timeout is part of the backend's configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when:
    /// - Network connection fails ([`TransportError::Connection`])
    /// - TLS negotiation fails ([`TransportError::Tls`])
    /// - A timeout expires ([`TransportError::Timeout`])
    /// - The peer sends malformed HTTP ([`TransportError::Http`])
    /// - The request cannot be expressed ([`TransportError::InvalidRequest`])
    fn send(
        &self,
        req: &SignedRequest,
        timeout: Duration,
    ) -> impl std::future::Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    async fn send(
        &self,
        req: &SignedRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        (**self).send(req, timeout).await
    }
}
