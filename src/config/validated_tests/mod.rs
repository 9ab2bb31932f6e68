//! Tests for validated configuration.

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::ValidatedConfig;

const SECRET: &str = "FKrO76r5VwJtBrqZawBspljbBNOxp5veKQQkOnZxucQ=";

/// Helper to create CLI args from a slice, followed by a `space` command
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["wallee"];
    full_args.extend(args);
    full_args.extend(["space", "405"]);
    Cli::parse_from_iter(full_args)
}

/// Helper to create CLI args that carry credentials
fn cli_with_credentials(args: &[&str]) -> Cli {
    let mut full_args = vec!["--user-id", "512", "--secret", SECRET];
    full_args.extend(args);
    cli(&full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}
