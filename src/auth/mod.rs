//! Request authentication.
//!
//! This module provides:
//! - Caller credentials ([`Credentials`], [`UserId`], [`SharedSecret`])
//! - The MAC signature over a request ([`sign`], [`Signature`])
//! - The canonical string the signature is computed over ([`canonical_string`])

mod credentials;
mod error;
mod signer;

#[cfg(test)]
mod signer_tests;

pub use credentials::{Credentials, SharedSecret, UserId};
pub use error::CredentialsError;
pub use signer::{MAC_VERSION, Signature, canonical_string, sign};
