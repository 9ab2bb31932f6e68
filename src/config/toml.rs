//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Account and endpoint section
    #[serde(default)]
    pub api: ApiSection,

    /// HTTP backend section
    #[serde(default)]
    pub transport: TransportSection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,
}

/// Account and endpoint section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// API endpoint
    pub base_url: Option<String>,

    /// Version segment of the API path
    pub api_version: Option<String>,

    /// Application user id, as a number or a string
    pub user_id: Option<UserIdValue>,

    /// Base64 shared secret
    pub secret: Option<String>,

    /// Space the calls are scoped to
    pub space_id: Option<u64>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// A user id written either as `user_id = 512` or `user_id = "512"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum UserIdValue {
    /// Numeric form
    Number(u64),
    /// String form
    Text(String),
}

impl fmt::Display for UserIdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// HTTP backend section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportSection {
    /// "pooled" or "socket"
    pub backend: Option<String>,

    /// Connect timeout in seconds
    pub connect_timeout: Option<u64>,

    /// Response timeout in seconds, per attempt
    pub read_timeout: Option<u64>,

    /// Deadline for a whole call in seconds
    pub call_timeout: Option<u64>,

    /// Idle connections kept per host by the pooled backend
    pub pool_max_idle_per_host: Option<usize>,
}

/// Retry policy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Maximum number of attempts
    pub max_attempts: Option<u32>,

    /// Initial retry delay in milliseconds
    pub initial_delay: Option<u64>,

    /// Maximum retry delay in milliseconds
    pub max_delay: Option<u64>,

    /// Backoff multiplier
    pub multiplier: Option<f64>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# wallee client configuration

[api]
# API endpoint (default: https://app-wallee.com)
# base_url = "https://app-wallee.com"

# Version segment of the API path (default: v2.0)
# api_version = "v2.0"

# Application user id (required)
# user_id = 512

# Base64 shared secret of the application user (required)
# Prefer the WALLEE_SECRET environment variable over storing it here.
# secret = ""

# Space the calls are scoped to (required by space-scoped commands)
# space_id = 405

# Extra headers sent with every request
# [api.headers]
# X-Custom-Header = "value"

[transport]
# HTTP backend: "pooled" (keep-alive pool) or "socket" (fresh connection per call)
# backend = "pooled"

# Connect timeout in seconds (default: 20)
# connect_timeout = 20

# Response timeout in seconds, per attempt (default: 25)
# read_timeout = 25

# Deadline for a whole call in seconds, retries included (default: none)
# call_timeout = 60

# Idle connections kept per host by the pooled backend (default: 8)
# pool_max_idle_per_host = 8

[retry]
# Maximum number of attempts, first one included (default: 3)
# max_attempts = 3

# Initial retry delay in milliseconds (default: 500)
# initial_delay = 500

# Maximum retry delay in milliseconds (default: 10000)
# max_delay = 10000

# Backoff multiplier, greater than 1.0 (default: 2.0)
# multiplier = 2.0
"#
    .to_string()
}
