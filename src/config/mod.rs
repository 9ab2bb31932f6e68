//! Configuration layer for the wallee command-line client.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Flags, or their environment variables
//!    (`WALLEE_USER_ID`, `WALLEE_SECRET`, `WALLEE_SPACE_ID`)
//! 2. **TOML config file** - `--config`, else `<config dir>/wallee/wallee.toml` when present
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Credentials have no default and must come from one of the first two sources.
//!
//! Headers are merged: TOML headers first, then CLI headers replacing any
//! header of the same name.
//!
//! # TOML-Only Options
//!
//! - `transport.pool_max_idle_per_host`
//! - `retry.max_delay` (default: 10000ms)
//! - `retry.multiplier` (default: 2.0)

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, UserIdValue, default_config_template};
pub use validated::{
    ValidatedConfig, default_config_path, parse_header_string, write_default_config,
};
