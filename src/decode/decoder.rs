//! Status classification and body decoding.

use serde_json::Value;

use super::Decode;
use crate::error::{ApiError, ClientFailure, ProtocolError};
use crate::model::ClientErrorBody;
use crate::transport::HttpResponse;

/// Outcome class of an HTTP status. Every status has exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 2xx
    Success,
    /// 4xx
    ClientError,
    /// 5xx
    ServerError,
    /// 1xx and 3xx
    Protocol,
}

/// Classifies `status`.
#[must_use]
pub fn classify(status: http::StatusCode) -> StatusClass {
    if status.is_success() {
        StatusClass::Success
    } else if status.is_client_error() {
        StatusClass::ClientError
    } else if status.is_server_error() {
        StatusClass::ServerError
    } else {
        StatusClass::Protocol
    }
}

/// Turns raw responses into typed results or typed errors.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseDecoder;

impl ResponseDecoder {
    /// Creates a decoder.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Decodes `response` into `R`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Client`] for 4xx, with the server's message
    /// - [`ApiError::Server`] for 5xx
    /// - [`ApiError::Protocol`] for other statuses and undecodable bodies
    /// - [`ApiError::Validation`] if the decoded model is invalid
    pub fn decode<R: Decode>(&self, response: &HttpResponse) -> Result<R, ApiError> {
        match classify(response.status) {
            StatusClass::Success => Self::decode_success(response),
            StatusClass::ClientError => Err(ApiError::Client(client_failure(response))),
            StatusClass::ServerError => Err(ApiError::Server {
                status: response.status,
                body: response
                    .body_text()
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                    .map(str::to_string),
                retry_after: response.retry_after(),
            }),
            StatusClass::Protocol => Err(ProtocolError::UnexpectedStatus {
                status: response.status,
            }
            .into()),
        }
    }

    fn decode_success<R: Decode>(response: &HttpResponse) -> Result<R, ApiError> {
        let body = response.body.trim_ascii();
        if body.is_empty() {
            return R::decode(Value::Null).map_err(ApiError::from);
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(value) => {
                tracing::trace!(status = %response.status, bytes = body.len(), "decoding response");
                R::decode(value).map_err(ApiError::from)
            }
            Err(parse_error) => Err(ProtocolError::MalformedBody {
                status: response.status,
                reason: parse_error.to_string(),
            }
            .into()),
        }
    }
}

/// Builds the failure details of a 4xx response.
///
/// The body is parsed leniently: a JSON error object supplies message, type
/// and field; anything else is kept as raw text.
fn client_failure(response: &HttpResponse) -> ClientFailure {
    let body = serde_json::from_slice::<ClientErrorBody>(&response.body).ok();
    let text = response
        .body_text()
        .map(str::trim)
        .filter(|text| !text.is_empty());

    let message = body
        .as_ref()
        .and_then(ClientErrorBody::best_message)
        .or(text)
        .or_else(|| response.status.canonical_reason())
        .unwrap_or("client error")
        .to_string();

    ClientFailure {
        status: response.status,
        message,
        field: body.as_ref().and_then(|b| b.field.clone()),
        body,
        retry_after: response.retry_after(),
    }
}
