//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::auth::CredentialsError;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// The user id or secret is malformed.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(#[from] CredentialsError),

    /// Invalid URL provided.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Unknown HTTP backend name.
    #[error("Invalid backend '{value}': expected one of {expected}")]
    InvalidBackend {
        /// The invalid value provided
        value: String,
        /// Accepted names
        expected: &'static str,
    },

    /// Invalid duration value (zero or too large).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid retry configuration.
    #[error("Invalid retry configuration: {0}")]
    InvalidRetry(String),

    /// Invalid header format.
    #[error("Invalid header format '{value}': expected 'Key=Value' or 'Key: Value'")]
    InvalidHeader {
        /// The invalid header string
        value: String,
    },

    /// Invalid header name.
    #[error("Invalid header name '{name}': {reason}")]
    InvalidHeaderName {
        /// The invalid header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid header value.
    #[error("Invalid header value for '{name}': {reason}")]
    InvalidHeaderValue {
        /// The header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The application user id.
    pub const USER_ID: &str = "user_id";
    /// The shared secret.
    pub const SECRET: &str = "secret";
    /// The space id.
    pub const SPACE_ID: &str = "space_id";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
