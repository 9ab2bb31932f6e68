//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::HeaderMap;
use http::header::{HeaderName, HeaderValue};
use url::Url;

use crate::auth::{Credentials, UserId};
use crate::client::{ClientConfig, RetryPolicy};
use crate::transport::BackendKind;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Client settings, credentials included
    pub client: ClientConfig,

    /// Space the calls are scoped to, if configured
    pub space_id: Option<u64>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let client = &self.client;
        let space = self
            .space_id
            .map_or_else(|| "none".to_string(), |id| id.to_string());
        let call_timeout = client
            .call_timeout
            .map_or_else(|| "none".to_string(), |t| format!("{}s", t.as_secs()));

        write!(
            f,
            "Config {{ base_url: {}, api_version: {}, user_id: {}, secret: <redacted>, space: {}, \
             backend: {}, timeouts: {}s/{}s/{}, retry: {}x/{}ms, headers: {} }}",
            client.base_url,
            client.api_version,
            client.credentials.user_id(),
            space,
            client.backend,
            client.connect_timeout.as_secs(),
            client.read_timeout.as_secs(),
            call_timeout,
            client.retry_policy.max_attempts,
            client.retry_policy.initial_delay.as_millis(),
            client.default_headers.len(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Credentials are missing or malformed (`user_id`, `secret`)
    /// - The base URL is invalid
    /// - The backend name is unknown
    /// - Duration values are zero
    /// - Retry settings are inconsistent
    /// - Header format is invalid
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let credentials = Self::resolve_credentials(cli, toml)?;
        let base_url = Self::resolve_base_url(cli, toml)?;

        let api_version = cli
            .api_version
            .clone()
            .or_else(|| toml.and_then(|t| t.api.api_version.clone()))
            .unwrap_or_else(|| defaults::API_VERSION.to_string());

        let backend = Self::resolve_backend(cli, toml)?;
        let (connect_timeout, read_timeout, call_timeout) = Self::resolve_timeouts(cli, toml)?;
        let retry_policy = Self::build_retry_policy(cli, toml)?;
        let headers = Self::resolve_headers(cli, toml)?;

        let pool_max_idle_per_host = toml
            .and_then(|t| t.transport.pool_max_idle_per_host)
            .unwrap_or(defaults::POOL_MAX_IDLE_PER_HOST);

        let mut client = ClientConfig::new(credentials)
            .with_base_url(base_url)
            .with_api_version(api_version)
            .with_backend(backend)
            .with_connect_timeout(connect_timeout)
            .with_read_timeout(read_timeout)
            .with_retry_policy(retry_policy)
            .with_default_headers(headers);
        if let Some(timeout) = call_timeout {
            client = client.with_call_timeout(timeout);
        }
        client.pool_max_idle_per_host = pool_max_idle_per_host;

        let space_id = cli.space_id.or_else(|| toml.and_then(|t| t.api.space_id));

        Ok(Self {
            client,
            space_id,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path. Otherwise
    /// the file at [`default_config_path`] is used when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| default_config_path().filter(|p| p.is_file()));

        let toml = if let Some(ref path) = path {
            tracing::debug!(path = %path.display(), "Loading config file");
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    /// Returns the configured space id.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if no space id was configured.
    pub fn require_space_id(&self) -> Result<u64, ConfigError> {
        self.space_id.ok_or_else(|| {
            ConfigError::missing(
                field::SPACE_ID,
                "Use --space-id, WALLEE_SPACE_ID, or set api.space_id in config file",
            )
        })
    }

    fn resolve_credentials(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Credentials, ConfigError> {
        let user_id: UserId = cli
            .user_id
            .clone()
            .or_else(|| toml.and_then(|t| t.api.user_id.as_ref().map(ToString::to_string)))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::USER_ID,
                    "Use --user-id, WALLEE_USER_ID, or set api.user_id in config file",
                )
            })?
            .into();

        let secret = cli
            .secret
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.secret.as_deref()))
            .ok_or_else(|| {
                ConfigError::missing(
                    field::SECRET,
                    "Use --secret, WALLEE_SECRET, or set api.secret in config file",
                )
            })?;

        Ok(Credentials::new(user_id, secret.trim())?)
    }

    fn resolve_base_url(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .base_url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.base_url.as_deref()))
            .unwrap_or(defaults::BASE_URL);

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        Ok(url)
    }

    fn resolve_backend(cli: &Cli, toml: Option<&TomlConfig>) -> Result<BackendKind, ConfigError> {
        let name = cli
            .backend
            .as_deref()
            .or_else(|| toml.and_then(|t| t.transport.backend.as_deref()))
            .unwrap_or(defaults::BACKEND);

        name.parse::<BackendKind>()
            .map_err(|_| ConfigError::InvalidBackend {
                value: name.to_string(),
                expected: BackendKind::VARIANTS,
            })
    }

    fn resolve_timeouts(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<(Duration, Duration, Option<Duration>), ConfigError> {
        let transport = toml.map(|t| &t.transport);

        // Priority: CLI explicit > TOML > default
        let connect = cli
            .connect_timeout
            .or_else(|| transport.and_then(|t| t.connect_timeout))
            .unwrap_or(defaults::CONNECT_TIMEOUT_SECS);
        let read = cli
            .read_timeout
            .or_else(|| transport.and_then(|t| t.read_timeout))
            .unwrap_or(defaults::READ_TIMEOUT_SECS);
        let call = cli
            .call_timeout
            .or_else(|| transport.and_then(|t| t.call_timeout));

        Ok((
            positive_secs("connect_timeout", connect)?,
            positive_secs("read_timeout", read)?,
            call.map(|secs| positive_secs("call_timeout", secs))
                .transpose()?,
        ))
    }

    fn build_retry_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RetryPolicy, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        // Priority: CLI explicit > TOML > default
        let max_attempts = cli
            .retry_max
            .or_else(|| retry.and_then(|r| r.max_attempts))
            .unwrap_or(defaults::RETRY_MAX_ATTEMPTS);

        let initial_delay_ms = cli
            .retry_delay
            .or_else(|| retry.and_then(|r| r.initial_delay))
            .unwrap_or(defaults::RETRY_INITIAL_DELAY_MS);

        let max_delay_ms = retry
            .and_then(|r| r.max_delay)
            .unwrap_or(defaults::RETRY_MAX_DELAY_MS);

        let multiplier = retry
            .and_then(|r| r.multiplier)
            .unwrap_or(defaults::RETRY_MULTIPLIER);

        if max_attempts == 0 {
            return Err(ConfigError::InvalidRetry(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if multiplier <= 1.0 || !multiplier.is_finite() {
            return Err(ConfigError::InvalidRetry(
                "multiplier must be a finite number greater than 1.0".to_string(),
            ));
        }

        if max_delay_ms < initial_delay_ms {
            return Err(ConfigError::InvalidRetry(format!(
                "max_delay ({max_delay_ms}ms) must be >= initial_delay ({initial_delay_ms}ms)"
            )));
        }

        Ok(RetryPolicy::new()
            .with_max_attempts(max_attempts)
            .with_initial_delay(Duration::from_millis(initial_delay_ms))
            .with_max_delay(Duration::from_millis(max_delay_ms))
            .with_multiplier(multiplier))
    }

    fn resolve_headers(cli: &Cli, toml: Option<&TomlConfig>) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        // Add TOML headers first (CLI can override)
        if let Some(toml) = toml {
            for (name, value) in &toml.api.headers {
                let header_name = parse_header_name(name)?;
                let header_value = parse_header_value(name, value)?;
                headers.insert(header_name, header_value);
            }
        }

        for header_str in &cli.headers {
            let (name, value) = parse_header_string(header_str)?;
            let header_name = parse_header_name(&name)?;
            let header_value = parse_header_value(&name, &value)?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }
}

/// Location of the config file used when `--config` is not given.
///
/// `<config dir>/wallee/wallee.toml`, e.g. `~/.config/wallee/wallee.toml` on Linux.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wallee").join("wallee.toml"))
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

fn positive_secs(field: &'static str, seconds: u64) -> Result<Duration, ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(Duration::from_secs(seconds))
}

/// Splits `Key=Value` or `Key: Value`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidHeader`] when neither separator is present.
pub fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    if let Some((name, value)) = s.split_once('=') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    if let Some((name, value)) = s.split_once(':') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    Err(ConfigError::InvalidHeader {
        value: s.to_string(),
    })
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
