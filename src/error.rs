//! Error taxonomy surfaced by [`ApiClient::execute`](crate::client::ApiClient::execute).
//!
//! Every failure is a typed [`ApiError`] whose [`ErrorKind`] callers can
//! branch on. Transport, decoding and validation failures stay distinct.

use std::any::Any;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::decode::Violation;
use crate::model::{ClientErrorBody, ClientErrorType};
use crate::transport::TransportError;

/// Stage of a call that ran out of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutStage {
    /// Establishing the TCP/TLS connection took too long.
    Connect,
    /// The server did not deliver a complete response in time.
    Response,
    /// The per-call deadline spanning all attempts expired.
    Deadline,
}

impl fmt::Display for TimeoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connect => "connect",
            Self::Response => "response",
            Self::Deadline => "call deadline",
        })
    }
}

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Host unreachable, connection refused or reset.
    Connection,
    /// TLS handshake or certificate failure.
    Tls,
    /// Connect, response or call deadline exceeded.
    Timeout,
    /// The server answered in a way the client cannot interpret.
    Protocol,
    /// 4xx: the caller can correct the request.
    Client,
    /// 5xx: failure on the provider side.
    Server,
    /// A decoded model violates its own invariants.
    Validation,
    /// The request could not be built locally.
    InvalidRequest,
}

/// Failures to interpret a response.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Status outside 2xx/4xx/5xx (informational or redirect).
    #[error("Unexpected HTTP status {status}")]
    UnexpectedStatus {
        /// The received status
        status: http::StatusCode,
    },

    /// A success response whose body is not valid JSON.
    #[error("Malformed response body (HTTP {status}): {reason}")]
    MalformedBody {
        /// The received status
        status: http::StatusCode,
        /// Parser message
        reason: String,
    },

    /// A polymorphic response named a subtype the client does not know.
    #[error("Unknown {family} discriminator {field}='{value}'")]
    UnknownDiscriminator {
        /// Name of the polymorphic family
        family: &'static str,
        /// Discriminator field name
        field: &'static str,
        /// The unrecognized value
        value: String,
    },

    /// A polymorphic response without a usable discriminator field.
    #[error("Missing {family} discriminator field '{field}'")]
    MissingDiscriminator {
        /// Name of the polymorphic family
        family: &'static str,
        /// Discriminator field name
        field: &'static str,
    },

    /// A declared property arrived with the wrong JSON type.
    #[error("Field '{field}' of {model}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Target model name
        model: &'static str,
        /// Property name
        field: &'static str,
        /// Declared kind
        expected: &'static str,
        /// Observed JSON kind
        found: &'static str,
    },

    /// The JSON could not be mapped onto the target type.
    #[error("Cannot decode {target}: {reason}")]
    Shape {
        /// Target type name
        target: &'static str,
        /// Mapping failure
        reason: String,
    },

    /// The HTTP exchange itself was malformed.
    #[error("Malformed HTTP exchange: {0}")]
    Http(String),
}

/// Details of a 4xx response.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientFailure {
    /// The received status
    pub status: http::StatusCode,
    /// Human-readable message
    pub message: String,
    /// Offending field, when the server names one
    pub field: Option<String>,
    /// Parsed error body, when the server sent one
    pub body: Option<ClientErrorBody>,
    /// Server-provided `Retry-After` hint
    pub retry_after: Option<Duration>,
}

impl ClientFailure {
    /// Returns the provider's error category, if known.
    #[must_use]
    pub fn error_type(&self) -> Option<ClientErrorType> {
        self.body.as_ref().and_then(|b| b.error_type)
    }

    /// Returns true for 409: the entity was modified concurrently and the
    /// caller should reload it before retrying with the new version.
    #[must_use]
    pub fn is_version_conflict(&self) -> bool {
        self.status == http::StatusCode::CONFLICT
    }

    /// Returns true for 429.
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status == http::StatusCode::TOO_MANY_REQUESTS
    }
}

/// A decoded model that failed its own validation.
pub struct ValidationFailure {
    model: &'static str,
    violations: Vec<Violation>,
    object: Box<dyn Any + Send + Sync>,
}

impl ValidationFailure {
    /// Wraps the constructed object together with its violations.
    #[must_use]
    pub fn new<M: Any + Send + Sync>(
        model: &'static str,
        object: M,
        violations: Vec<Violation>,
    ) -> Self {
        Self {
            model,
            violations,
            object: Box::new(object),
        }
    }

    /// Name of the model that failed validation.
    #[must_use]
    pub const fn model(&self) -> &'static str {
        self.model
    }

    /// Name of the first offending field.
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        self.violations.first().map(|v| v.field)
    }

    /// All violations, in declaration order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The partially valid object, if it is an `M`.
    #[must_use]
    pub fn object<M: Any>(&self) -> Option<&M> {
        self.object.downcast_ref()
    }
}

impl fmt::Debug for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationFailure")
            .field("model", &self.model)
            .field("violations", &self.violations)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed validation", self.model)?;
        for (i, violation) in self.violations.iter().enumerate() {
            let sep = if i == 0 { ": " } else { "; " };
            write!(f, "{sep}{violation}")?;
        }
        Ok(())
    }
}

/// Error returned by every API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Could not reach the host.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// TLS handshake or certificate verification failed.
    #[error("TLS error: {0}")]
    Tls(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A timeout expired.
    #[error("Request timed out ({0})")]
    Timeout(TimeoutStage),

    /// The response could not be interpreted.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The server rejected the request (4xx).
    #[error("Client error (HTTP {}): {}", .0.status, .0.message)]
    Client(ClientFailure),

    /// The server failed (5xx).
    #[error("Server error (HTTP {status})")]
    Server {
        /// The received status
        status: http::StatusCode,
        /// Raw body text, for diagnostics only
        body: Option<String>,
        /// Server-provided `Retry-After` hint
        retry_after: Option<Duration>,
    },

    /// A decoded model violates its invariants.
    #[error("{0}")]
    Validation(Box<ValidationFailure>),

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Returns the coarse classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection(_) => ErrorKind::Connection,
            Self::Tls(_) => ErrorKind::Tls,
            Self::Timeout(_) => ErrorKind::Timeout,
            Self::Protocol(_) => ErrorKind::Protocol,
            Self::Client(_) => ErrorKind::Client,
            Self::Server { .. } => ErrorKind::Server,
            Self::Validation(_) => ErrorKind::Validation,
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// Returns the HTTP status when the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<http::StatusCode> {
        match self {
            Self::Client(failure) => Some(failure.status),
            Self::Server { status, .. }
            | Self::Protocol(
                ProtocolError::UnexpectedStatus { status }
                | ProtocolError::MalformedBody { status, .. },
            ) => Some(*status),
            _ => None,
        }
    }

    /// Returns the server's `Retry-After` hint, if the response carried one.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Client(failure) => failure.retry_after,
            Self::Server { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Returns the client failure details for 4xx errors.
    #[must_use]
    pub const fn as_client(&self) -> Option<&ClientFailure> {
        match self {
            Self::Client(failure) => Some(failure),
            _ => None,
        }
    }

    /// Returns the validation details for validation errors.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Validation(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Connection(source) => Self::Connection(source),
            TransportError::Tls(source) => Self::Tls(source),
            TransportError::Timeout(stage) => Self::Timeout(stage),
            TransportError::Http(reason) => Self::Protocol(ProtocolError::Http(reason)),
            TransportError::InvalidRequest(reason) | TransportError::Setup(reason) => {
                Self::InvalidRequest(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Violation;
    use std::error::Error as _;

    #[derive(Debug, PartialEq)]
    struct Probe {
        id: Option<i64>,
    }

    fn client_failure(status: u16) -> ClientFailure {
        ClientFailure {
            status: http::StatusCode::from_u16(status).unwrap(),
            message: "rejected".to_string(),
            field: None,
            body: None,
            retry_after: None,
        }
    }

    #[test]
    fn kinds_are_distinct_per_variant() {
        let errors = [
            ApiError::Connection("refused".into()),
            ApiError::Tls("bad certificate".into()),
            ApiError::Timeout(TimeoutStage::Response),
            ApiError::Protocol(ProtocolError::Http("garbage".into())),
            ApiError::Client(client_failure(400)),
            ApiError::Server {
                status: http::StatusCode::BAD_GATEWAY,
                body: None,
                retry_after: None,
            },
            ApiError::Validation(Box::new(ValidationFailure::new(
                "Probe",
                Probe { id: None },
                vec![Violation::required("id")],
            ))),
            ApiError::InvalidRequest("bad".into()),
        ];

        let kinds: std::collections::HashSet<ErrorKind> =
            errors.iter().map(ApiError::kind).collect();
        assert_eq!(kinds.len(), errors.len());
    }

    #[test]
    fn status_is_exposed_for_http_errors() {
        assert_eq!(
            ApiError::Client(client_failure(404)).status(),
            Some(http::StatusCode::NOT_FOUND)
        );
        assert_eq!(ApiError::Timeout(TimeoutStage::Connect).status(), None);
    }

    #[test]
    fn client_failure_flags_conflicts_and_rate_limits() {
        assert!(client_failure(409).is_version_conflict());
        assert!(!client_failure(400).is_version_conflict());
        assert!(client_failure(429).is_rate_limited());
    }

    #[test]
    fn validation_failure_exposes_field_and_object() {
        let failure = ValidationFailure::new(
            "Probe",
            Probe { id: None },
            vec![Violation::required("id"), Violation::required("version")],
        );

        assert_eq!(failure.model(), "Probe");
        assert_eq!(failure.field(), Some("id"));
        assert_eq!(failure.violations().len(), 2);
        assert_eq!(failure.object::<Probe>(), Some(&Probe { id: None }));
        assert!(failure.object::<String>().is_none());
        assert_eq!(
            failure.to_string(),
            "Probe failed validation: 'id' can't be null; 'version' can't be null"
        );
    }

    #[test]
    fn connection_error_preserves_source() {
        let err = ApiError::from(TransportError::Connection("refused".into()));

        assert_eq!(err.kind(), ErrorKind::Connection);
        assert_eq!(err.source().unwrap().to_string(), "refused");
    }

    #[test]
    fn transport_timeout_keeps_stage() {
        let err = ApiError::from(TransportError::Timeout(TimeoutStage::Connect));

        assert!(matches!(err, ApiError::Timeout(TimeoutStage::Connect)));
        assert_eq!(err.to_string(), "Request timed out (connect)");
    }
}
