//! Caller identity and shared secret.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::CredentialsError;

/// Principal identifier of the calling application user.
///
/// The API issues numeric ids, but the value is carried as text because it
/// only ever appears in headers and in the signed canonical string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Returns the id as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.trim().to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self::from(id.as_str())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Symmetric signing key.
///
/// Holds the decoded key bytes. The secret is never transmitted and never
/// printed: `Debug` shows only its length.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    /// Decodes a base64 secret as issued by the provider.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError::EmptySecret`] for blank input and
    /// [`CredentialsError::InvalidSecret`] when the text is not base64.
    pub fn from_base64(encoded: &str) -> Result<Self, CredentialsError> {
        let encoded = encoded.trim();
        if encoded.is_empty() {
            return Err(CredentialsError::EmptySecret);
        }

        let bytes = STANDARD.decode(encoded)?;
        if bytes.is_empty() {
            return Err(CredentialsError::EmptySecret);
        }
        Ok(Self(bytes))
    }

    /// Wraps raw key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError::EmptySecret`] if `bytes` is empty.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self, CredentialsError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(CredentialsError::EmptySecret);
        }
        Ok(Self(bytes))
    }

    /// Returns the key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSecret(<{} bytes redacted>)", self.0.len())
    }
}

/// Credentials used to sign every request.
///
/// Immutable once constructed.
///
/// # Example
///
/// ```
/// use wallee_sdk::auth::Credentials;
///
/// let credentials =
///     Credentials::new(512_u64, "FKrO76r5VwJtBrqZawBspljbBNOxp5veKQQkOnZxucQ=").unwrap();
/// assert_eq!(credentials.user_id().as_str(), "512");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    user_id: UserId,
    secret: SharedSecret,
}

impl Credentials {
    /// Creates credentials from a user id and a base64-encoded secret.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError`] if the user id is empty or not visible
    /// ASCII, or if the secret is empty or not valid base64.
    pub fn new(user_id: impl Into<UserId>, secret_b64: &str) -> Result<Self, CredentialsError> {
        let secret = SharedSecret::from_base64(secret_b64)?;
        Self::from_parts(user_id.into(), secret)
    }

    /// Creates credentials from an already decoded secret.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialsError`] if the user id is empty or not visible ASCII.
    pub fn from_parts(user_id: UserId, secret: SharedSecret) -> Result<Self, CredentialsError> {
        if user_id.0.is_empty() {
            return Err(CredentialsError::EmptyUserId);
        }
        if !user_id.0.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(CredentialsError::InvalidUserId(user_id.0));
        }
        Ok(Self { user_id, secret })
    }

    /// Returns the principal id.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the signing key.
    #[must_use]
    pub const fn secret(&self) -> &SharedSecret {
        &self.secret
    }
}
