//! Application execution logic.
//!
//! Turns a parsed [`Command`] into one API call and renders the result as
//! pretty-printed JSON.

use std::process::ExitCode;

use http::Method;
use serde::Serialize;
use thiserror::Error;

use wallee_sdk::client::{ApiClient, ApiExecutor};
use wallee_sdk::config::{Command, ConfigError, ValidatedConfig};
use wallee_sdk::error::ApiError;
use wallee_sdk::request::ApiRequest;
use wallee_sdk::service::{SpaceService, TransactionCompletionService, TransactionPaymentPageService};

use crate::app::exit_code;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The command needs configuration that was not provided.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A command argument could not be turned into a request.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The API call failed.
    #[error("API call failed: {0}")]
    Api(#[from] ApiError),

    /// The response could not be rendered.
    #[error("Failed to render response: {0}")]
    Render(#[source] serde_json::Error),
}

impl RunError {
    /// Maps the error to the process exit code.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) | Self::InvalidArgument(_) => exit_code::CONFIG_ERROR,
            Self::Api(_) | Self::Render(_) => exit_code::runtime_error(),
        }
    }
}

/// Executes `command` against the configured API.
///
/// Returns the text to print on success.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the command lacks a
/// required setting, or the call fails.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, command: Command) -> Result<String, RunError> {
    let space_id = config.space_id;
    let client = ApiClient::from_config(config.client)?;
    tracing::debug!(backend = %client.transport().kind(), "Client ready");

    run_command(&client, command, space_id).await
}

/// Runs one command on `executor`.
///
/// # Errors
///
/// See [`execute`].
pub async fn run_command<E: ApiExecutor>(
    executor: E,
    command: Command,
    space_id: Option<u64>,
) -> Result<String, RunError> {
    match command {
        Command::Init { .. } => Err(RunError::InvalidArgument(
            "init does not call the API".to_string(),
        )),
        Command::Call {
            path,
            method,
            query,
            body,
        } => {
            let request = build_call_request(&path, &method, &query, body, space_id)?;
            let value: serde_json::Value = executor.execute(request).await?;
            render(&value)
        }
        Command::Space { id } => {
            let space = SpaceService::new(executor).read(id).await?;
            render(&space)
        }
        Command::PaymentPageUrl { transaction } => {
            let space_id = require_space(space_id)?;
            TransactionPaymentPageService::new(executor)
                .payment_page_url(space_id, transaction)
                .await
                .map_err(RunError::from)
        }
        Command::CompleteOffline { transaction } => {
            let space_id = require_space(space_id)?;
            let completion = TransactionCompletionService::new(executor)
                .complete_offline(space_id, transaction)
                .await?;
            tracing::info!(id = ?completion.id, state = ?completion.state, "Completion created");
            render(&completion)
        }
    }
}

/// Builds the request for the generic `call` command.
///
/// The space id, when configured, is attached both as header and as the
/// `spaceId` query parameter unless the caller already passed one.
fn build_call_request(
    path: &str,
    method: &str,
    query: &[String],
    body: Option<String>,
    space_id: Option<u64>,
) -> Result<ApiRequest, RunError> {
    let method = Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes())
        .map_err(|_| RunError::InvalidArgument(format!("unknown HTTP method '{method}'")))?;

    let mut request = ApiRequest::new(method, path);
    let mut has_space_query = false;
    for pair in query {
        let (name, value) = pair.split_once('=').ok_or_else(|| {
            RunError::InvalidArgument(format!("query '{pair}' must be in 'Key=Value' format"))
        })?;
        has_space_query |= name.trim() == "spaceId";
        request = request.query(name.trim(), value.trim());
    }

    if let Some(space_id) = space_id {
        request = request.space(space_id);
        if !has_space_query {
            request = request.query("spaceId", space_id);
        }
    }

    if let Some(body) = body {
        serde_json::from_str::<serde_json::Value>(&body)
            .map_err(|e| RunError::InvalidArgument(format!("body is not valid JSON: {e}")))?;
        request = request.raw_json(body);
    }

    Ok(request)
}

fn require_space(space_id: Option<u64>) -> Result<u64, RunError> {
    space_id.ok_or_else(|| {
        RunError::Config(ConfigError::missing(
            wallee_sdk::config::field::SPACE_ID,
            "Use --space-id, WALLEE_SPACE_ID, or set api.space_id in config file",
        ))
    })
}

fn render<T: Serialize>(value: &T) -> Result<String, RunError> {
    serde_json::to_string_pretty(value).map_err(RunError::Render)
}
