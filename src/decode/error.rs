//! Decoding errors.

use thiserror::Error;

use crate::error::{ApiError, ProtocolError, ValidationFailure};

/// Why a response body could not become the requested type.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The JSON does not have the expected shape.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The object was built but violates its invariants.
    #[error("{0}")]
    Validation(Box<ValidationFailure>),
}

impl DecodeError {
    pub(crate) fn shape(target: &'static str, reason: impl Into<String>) -> Self {
        Self::Protocol(ProtocolError::Shape {
            target,
            reason: reason.into(),
        })
    }
}

impl From<DecodeError> for ApiError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::Protocol(err) => Self::Protocol(err),
            DecodeError::Validation(failure) => Self::Validation(failure),
        }
    }
}
