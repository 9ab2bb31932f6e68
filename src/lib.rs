//! wallee-sdk: signed-request client for the wallee payment API
//!
//! A library that signs every call with the account's shared secret, sends
//! it over a pooled or single-socket HTTP backend, retries transient
//! failures, and decodes responses into typed models.

pub mod auth;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod model;
pub mod request;
pub mod service;
pub mod time;
pub mod transport;
