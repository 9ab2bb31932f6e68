//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};


/// wallee: signed calls against the wallee payment API
///
/// Every request is signed with the account's user id and shared secret.
/// Connection settings can come from flags, the environment, or a TOML
/// configuration file.
#[derive(Debug, Parser)]
#[command(name = "wallee")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// API endpoint
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// API version segment
    #[arg(long = "api-version", global = true)]
    pub api_version: Option<String>,

    /// Application user id
    #[arg(long = "user-id", env = "WALLEE_USER_ID", global = true)]
    pub user_id: Option<String>,

    /// Base64 shared secret of the application user
    #[arg(long, env = "WALLEE_SECRET", hide_env_values = true, global = true)]
    pub secret: Option<String>,

    /// Space the calls are scoped to
    #[arg(long = "space-id", env = "WALLEE_SPACE_ID", global = true)]
    pub space_id: Option<u64>,

    /// HTTP backend: pooled or socket
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Connect timeout in seconds
    #[arg(long = "connect-timeout", global = true)]
    pub connect_timeout: Option<u64>,

    /// Response timeout in seconds, per attempt
    #[arg(long = "read-timeout", global = true)]
    pub read_timeout: Option<u64>,

    /// Deadline for a whole call in seconds, retries included
    #[arg(long = "call-timeout", global = true)]
    pub call_timeout: Option<u64>,

    /// Maximum number of attempts per call
    #[arg(long = "retry-max", global = true)]
    pub retry_max: Option<u32>,

    /// Initial retry delay in milliseconds
    #[arg(long = "retry-delay", global = true)]
    pub retry_delay: Option<u64>,

    /// Extra headers in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V", global = true)]
    pub headers: Vec<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for wallee
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "wallee.toml")]
        output: PathBuf,
    },

    /// Send a signed request and print the JSON response
    Call {
        /// Resource path below the versioned API root, e.g. /space/read
        path: String,

        /// HTTP method
        #[arg(long = "method", short = 'X', default_value = "GET")]
        method: String,

        /// Query parameters in 'Key=Value' format (can be specified multiple times)
        #[arg(long = "query", short = 'q', value_name = "K=V")]
        query: Vec<String>,

        /// JSON request body
        #[arg(long)]
        body: Option<String>,
    },

    /// Read a space
    Space {
        /// Space id
        id: u64,
    },

    /// Print the payment page URL of a transaction
    PaymentPageUrl {
        /// Transaction id
        transaction: i64,
    },

    /// Complete a transaction without contacting the processor
    CompleteOffline {
        /// Transaction id
        transaction: i64,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
