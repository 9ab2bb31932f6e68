//! Logical requests and their signed wire form.
//!
//! Generated services describe a call as an [`ApiRequest`]; the
//! [`RequestBuilder`] expands the path template, appends the query, and
//! stamps and signs the result into a [`SignedRequest`](crate::transport::SignedRequest).

mod builder;
mod logical;

#[cfg(test)]
mod builder_tests;
#[cfg(test)]
mod logical_tests;

pub use builder::{RequestBuilder, header};
pub use logical::ApiRequest;
