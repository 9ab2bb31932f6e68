//! Single-use raw-socket HTTP backend.
//!
//! Every call opens its own TCP connection (wrapped in TLS for `https`),
//! performs exactly one HTTP/1.1 exchange over hyper's connection-level API
//! and closes the socket. Nothing is pooled or shared between calls.

use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::client::legacy::connect::HttpConnector;
use tower::ServiceExt;

use super::{HttpResponse, SignedRequest, Transport, TransportError, TransportOptions, tls};
use crate::error::TimeoutStage;

/// Backend that uses one fresh socket per request.
///
/// Suited to environments where keeping pooled connections open is
/// unavailable or undesired. Redirects are never followed.
#[derive(Debug, Clone)]
pub struct SocketTransport {
    connector: HttpsConnector<HttpConnector>,
    connect_timeout: Duration,
}

impl SocketTransport {
    /// Creates a socket backend from the given options.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Setup`] when no TLS trust roots are available.
    pub fn new(options: &TransportOptions) -> Result<Self, TransportError> {
        let tls = tls::client_config().map_err(TransportError::Setup)?;
        Ok(Self::with_tls_config(tls, options.connect_timeout))
    }

    /// Creates a socket backend with a caller-supplied TLS configuration.
    #[must_use]
    pub fn with_tls_config(tls: rustls::ClientConfig, connect_timeout: Duration) -> Self {
        let mut http = HttpConnector::new();
        http.enforce_http(false);
        http.set_nodelay(true);

        let connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls)
            .https_or_http()
            .enable_http1()
            .wrap_connector(http);

        Self {
            connector,
            connect_timeout,
        }
    }

    /// Returns the configured connect timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

impl Transport for SocketTransport {
    async fn send(
        &self,
        req: &SignedRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        let uri: http::Uri = req
            .url()
            .as_str()
            .parse()
            .map_err(|e: http::uri::InvalidUri| TransportError::InvalidRequest(e.to_string()))?;

        let connect = self.connector.clone().oneshot(uri.clone());
        let stream = tokio::time::timeout(self.connect_timeout, connect)
            .await
            .map_err(|_| TransportError::Timeout(TimeoutStage::Connect))?
            .map_err(TransportError::from_connect)?;

        let outgoing = to_hyper_request(req, &uri)?;

        tokio::time::timeout(timeout, exchange(stream, outgoing))
            .await
            .map_err(|_| TransportError::Timeout(TimeoutStage::Response))?
    }
}

/// Converts a signed request into an origin-form HTTP/1.1 request.
fn to_hyper_request(
    req: &SignedRequest,
    uri: &http::Uri,
) -> Result<http::Request<Full<Bytes>>, TransportError> {
    let authority = uri
        .authority()
        .ok_or_else(|| TransportError::InvalidRequest(format!("URL '{uri}' has no host")))?;
    let path = uri.path_and_query().map_or("/", http::uri::PathAndQuery::as_str);

    let mut builder = http::Request::builder()
        .method(req.method().clone())
        .uri(path)
        .header(http::header::HOST, authority.as_str())
        .header(http::header::CONNECTION, "close");

    for (name, value) in req.headers() {
        builder = builder.header(name, value);
    }

    let body = req.body().cloned().unwrap_or_default();
    builder
        .body(Full::new(body))
        .map_err(|e| TransportError::InvalidRequest(e.to_string()))
}

/// Runs one request/response exchange on a freshly connected stream.
async fn exchange<I>(
    io: I,
    outgoing: http::Request<Full<Bytes>>,
) -> Result<HttpResponse, TransportError>
where
    I: hyper::rt::Read + hyper::rt::Write + Unpin + Send + 'static,
{
    let (mut sender, connection) = hyper::client::conn::http1::handshake(io)
        .await
        .map_err(map_hyper_error)?;

    // The connection future drives the socket; it ends once the response
    // is read and the sender is dropped.
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::debug!(error = %e, "socket connection closed with error");
        }
    });

    let response = sender
        .send_request(outgoing)
        .await
        .map_err(map_hyper_error)?;
    let (parts, body) = response.into_parts();
    let body = body.collect().await.map_err(map_hyper_error)?.to_bytes();

    Ok(HttpResponse::new(parts.status, parts.headers, body.to_vec()))
}

fn map_hyper_error(e: hyper::Error) -> TransportError {
    if e.is_parse() || e.is_parse_status() {
        TransportError::Http(e.to_string())
    } else if e.is_timeout() {
        TransportError::Timeout(TimeoutStage::Response)
    } else if super::error::is_tls_failure(&e) {
        TransportError::Tls(Box::new(e))
    } else {
        TransportError::Connection(Box::new(e))
    }
}
