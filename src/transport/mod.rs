//! Transport layer: executes signed requests over HTTP.
//!
//! This module provides types and traits for:
//! - Signed, immutable outgoing requests ([`SignedRequest`])
//! - Raw responses ([`HttpResponse`])
//! - Abstracting HTTP backends ([`Transport`])
//! - A connection-pooling backend ([`PooledTransport`])
//! - A single-use raw-socket backend ([`SocketTransport`])
//! - Backend selection at construction time ([`Backend`], [`BackendKind`])

mod backend;
mod error;
mod message;
mod options;
mod pooled;
mod socket;
mod tls;


pub use backend::{Backend, BackendKind};
pub use error::TransportError;
pub use message::{HttpResponse, SignedRequest, Transport};
pub use options::TransportOptions;
pub use pooled::PooledTransport;
pub use socket::SocketTransport;
