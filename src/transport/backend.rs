//! Backend selection.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::{
    HttpResponse, PooledTransport, SignedRequest, SocketTransport, Transport, TransportError,
    TransportOptions,
};

/// Which backend to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Keep-alive connection pool (reqwest).
    #[default]
    Pooled,
    /// One fresh socket per call (hyper connection API).
    Socket,
}

impl BackendKind {
    /// Accepted spellings, for error messages.
    pub const VARIANTS: &'static str = "pooled, socket";
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pooled" | "pool" | "curl" => Ok(Self::Pooled),
            "socket" | "raw" => Ok(Self::Socket),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pooled => "pooled",
            Self::Socket => "socket",
        })
    }
}

/// A backend chosen once at client construction.
///
/// Dispatch is a match on this enum; the choice never changes for the
/// lifetime of the client.
#[derive(Debug, Clone)]
pub enum Backend {
    /// Pooled reqwest backend.
    Pooled(PooledTransport),
    /// Single-use socket backend.
    Socket(SocketTransport),
}

impl Backend {
    /// Builds the backend of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Setup`] if the backend cannot be initialized.
    pub fn build(kind: BackendKind, options: &TransportOptions) -> Result<Self, TransportError> {
        tracing::debug!("Building {kind} transport backend");
        match kind {
            BackendKind::Pooled => PooledTransport::new(options).map(Self::Pooled),
            BackendKind::Socket => SocketTransport::new(options).map(Self::Socket),
        }
    }

    /// Returns which kind of backend this is.
    #[must_use]
    pub const fn kind(&self) -> BackendKind {
        match self {
            Self::Pooled(_) => BackendKind::Pooled,
            Self::Socket(_) => BackendKind::Socket,
        }
    }
}

impl Transport for Backend {
    async fn send(
        &self,
        req: &SignedRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, TransportError> {
        match self {
            Self::Pooled(transport) => transport.send(req, timeout).await,
            Self::Socket(transport) => transport.send(req, timeout).await,
        }
    }
}
