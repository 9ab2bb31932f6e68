//! Client facade: the entry point generated services call through.
//!
//! This module provides:
//! - Client settings ([`ClientConfig`])
//! - The signed, retried, decoded call pipeline ([`ApiClient`])
//! - The seam services depend on ([`ApiExecutor`])
//! - Retry configuration ([`RetryPolicy`], [`RetryDecision`])

mod executor;
mod retry;
mod settings;

#[cfg(test)]
mod retry_tests;

pub use executor::{ApiClient, ApiExecutor};
pub use retry::{IsRetryable, RetryDecision, RetryPolicy};
pub use settings::ClientConfig;
