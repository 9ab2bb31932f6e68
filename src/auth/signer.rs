//! MAC signing of outgoing requests.
//!
//! The signature is an HMAC-SHA512 over a canonical string keyed with the
//! decoded shared secret:
//!
//! ```text
//! {MAC_VERSION}|{user_id}|{timestamp_ms}|{METHOD}|{path}
//! ```
//!
//! `path` is the request path with its leading slash and without the query
//! string. The timestamp is passed in rather than read here, so signing is a
//! pure function of its inputs.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha512;

use super::{SharedSecret, UserId};

type HmacSha512 = Hmac<Sha512>;

/// Version of the canonical string layout, sent as `x-mac-version`.
pub const MAC_VERSION: u32 = 1;

/// Raw MAC bytes of one request.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(Vec<u8>);

impl Signature {
    /// Returns the raw digest bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the standard base64 form used in the `x-mac-value` header.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_base64())
    }
}

/// Builds the string the signature is computed over.
///
/// The method is upper-cased; any query string on `path` is cut off.
#[must_use]
pub fn canonical_string(
    method: &http::Method,
    path: &str,
    timestamp_ms: u64,
    user_id: &UserId,
) -> String {
    let path = path.split_once('?').map_or(path, |(p, _)| p);
    format!(
        "{MAC_VERSION}|{user_id}|{timestamp_ms}|{}|{path}",
        method.as_str().to_ascii_uppercase()
    )
}

/// Signs one request.
///
/// Identical inputs always produce identical signatures.
#[must_use]
pub fn sign(
    method: &http::Method,
    path: &str,
    timestamp_ms: u64,
    user_id: &UserId,
    secret: &SharedSecret,
) -> Signature {
    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC can take a key of any size");
    mac.update(canonical_string(method, path, timestamp_ms, user_id).as_bytes());
    Signature(mac.finalize().into_bytes().to_vec())
}
