//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use tracing::Level;
use tracing_subscriber::EnvFilter;
use wallee_sdk::config::{ConfigError, defaults, field};
use wallee_sdk::error::ErrorKind;

use crate::run::RunError;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, missing required fields, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - network failure, API error, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingRequired { field: f, .. } => {
            if *f == field::USER_ID {
                eprintln!("\nRun 'wallee init' to generate a configuration template.");
            } else if *f == field::SECRET {
                eprintln!(
                    "\nExport {} to keep the secret out of the shell history.",
                    defaults::SECRET_ENV
                );
            }
        }
        ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'wallee init' to generate a configuration template.");
        }
        _ => {}
    }
}

/// Prints hints for API failures a user can act on.
pub fn print_runtime_hint(error: &RunError) {
    let RunError::Api(api) = error else {
        return;
    };
    match api.kind() {
        ErrorKind::Client if api.status() == Some(http::StatusCode::UNAUTHORIZED) => {
            eprintln!("\nThe server rejected the signature. Check the user id and secret.");
        }
        ErrorKind::Timeout => {
            eprintln!("\nThe call timed out. Consider raising --read-timeout or --call-timeout.");
        }
        _ => {}
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so command output on stdout stays machine readable.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
