//! Error types for HTTP transports.

use std::error::Error as StdError;

use thiserror::Error;

use crate::error::TimeoutStage;

/// Error type for a single HTTP exchange.
///
/// Describes what went wrong without dictating recovery strategy.
/// The retry policy decides which of these are worth another attempt.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and connections reset mid-exchange.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn StdError + Send + Sync>),

    /// TLS handshake or certificate verification failed.
    #[error("TLS error: {0}")]
    Tls(#[source] Box<dyn StdError + Send + Sync>),

    /// Connect or response timeout expired.
    #[error("Request timed out ({0})")]
    Timeout(TimeoutStage),

    /// The peer spoke malformed HTTP.
    #[error("Malformed HTTP exchange: {0}")]
    Http(String),

    /// The request cannot be expressed by this backend (bad URL, bad header).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The backend could not be constructed.
    #[error("Transport setup failed: {0}")]
    Setup(String),
}

impl TransportError {
    /// Classifies a connect-phase failure by walking its source chain.
    ///
    /// rustls errors (possibly wrapped in `io::Error`) become [`Self::Tls`],
    /// `TimedOut` I/O errors become a connect timeout, and everything else
    /// is a [`Self::Connection`] failure.
    pub(crate) fn from_connect(err: Box<dyn StdError + Send + Sync>) -> Self {
        if is_tls_failure(err.as_ref()) {
            Self::Tls(err)
        } else if is_timed_out(err.as_ref()) {
            Self::Timeout(TimeoutStage::Connect)
        } else {
            Self::Connection(err)
        }
    }
}

/// Iterates an error and its sources, looking through `io::Error` wrappers.
fn chain<'a>(
    err: &'a (dyn StdError + 'static),
) -> impl Iterator<Item = &'a (dyn StdError + 'static)> {
    std::iter::successors(Some(err), |&e| {
        // io::Error::source skips its own payload, so unwrap it explicitly.
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if let Some(inner) = io.get_ref() {
                return Some(inner as &(dyn StdError + 'static));
            }
        }
        e.source()
    })
}

/// Returns true if any error in the chain comes from rustls.
pub(crate) fn is_tls_failure(err: &(dyn StdError + 'static)) -> bool {
    chain(err).any(|e| e.is::<rustls::Error>())
}

/// Returns true if any error in the chain is an I/O timeout.
pub(crate) fn is_timed_out(err: &(dyn StdError + 'static)) -> bool {
    chain(err).any(|e| {
        e.downcast_ref::<std::io::Error>()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::TimedOut)
    })
}
