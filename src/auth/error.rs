//! Error types for credential construction.

use thiserror::Error;

/// Error type for building [`Credentials`](super::Credentials).
///
/// All variants are configuration mistakes; none of them is transient.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// The user id is empty.
    #[error("User id must not be empty")]
    EmptyUserId,

    /// The user id contains characters that cannot travel in a header.
    #[error("User id '{0}' must consist of visible ASCII characters")]
    InvalidUserId(String),

    /// The shared secret is empty.
    #[error("Shared secret must not be empty")]
    EmptySecret,

    /// The shared secret is not valid base64.
    #[error("Shared secret is not valid base64: {0}")]
    InvalidSecret(#[from] base64::DecodeError),
}
