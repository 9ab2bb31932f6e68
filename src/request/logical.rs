//! Backend-agnostic description of one API call.

use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;

use crate::error::ApiError;

/// One API call before serialization and signing.
///
/// The path is a template relative to the versioned API root, e.g.
/// `/transaction-completion/read` or `/space/{id}`; placeholders are filled
/// from [`ApiRequest::path_param`]. A request is created per call and
/// consumed by [`ApiClient::execute`](crate::client::ApiClient::execute).
///
/// # Example
///
/// ```
/// use wallee_sdk::request::ApiRequest;
///
/// let request = ApiRequest::post("/transaction-completion/completeOffline")
///     .query("id", 42)
///     .space(405);
/// assert_eq!(request.path_template(), "/transaction-completion/completeOffline");
/// ```
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: http::Method,
    path: String,
    path_params: Vec<(String, String)>,
    query: Vec<(String, String)>,
    body: Option<Bytes>,
    space_id: Option<u64>,
    timeout: Option<Duration>,
}

impl ApiRequest {
    /// Creates a request with the given method and path template.
    #[must_use]
    pub fn new(method: http::Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            path_params: Vec::new(),
            query: Vec::new(),
            body: None,
            space_id: None,
            timeout: None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(http::Method::GET, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(http::Method::POST, path)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(http::Method::PUT, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(http::Method::DELETE, path)
    }

    /// Supplies the value of a `{name}` placeholder in the path template.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.path_params.push((name.into(), value.to_string()));
        self
    }

    /// Appends a query parameter. Repeated names are sent repeatedly.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), value.to_string()));
        self
    }

    /// Appends a query parameter when `value` is present.
    #[must_use]
    pub fn query_opt(self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(name, value),
            None => self,
        }
    }

    /// Scopes the call to a space (tenant).
    #[must_use]
    pub const fn space(mut self, space_id: u64) -> Self {
        self.space_id = Some(space_id);
        self
    }

    /// Bounds the whole call, all retries included.
    ///
    /// Overrides the client's default call timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// The bytes are produced once here and reused unchanged by every attempt.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if `body` cannot be serialized.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| ApiError::InvalidRequest(format!("Cannot serialize body: {e}")))?;
        self.body = Some(Bytes::from(bytes));
        Ok(self)
    }

    /// Uses pre-serialized JSON as the request body.
    #[must_use]
    pub fn raw_json(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &http::Method {
        &self.method
    }

    /// Path template as given.
    #[must_use]
    pub fn path_template(&self) -> &str {
        &self.path
    }

    /// Query parameters in insertion order.
    #[must_use]
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Serialized body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Space the call is scoped to.
    #[must_use]
    pub const fn space_id(&self) -> Option<u64> {
        self.space_id
    }

    /// Per-call deadline override.
    #[must_use]
    pub const fn call_timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Expands the template into path segments, filling placeholders.
    ///
    /// Literal segments are returned as written; placeholder values are
    /// returned raw and percent-encoded later by the URL builder.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for a placeholder without a
    /// value, or for a value that is empty.
    pub(crate) fn path_segments(&self) -> Result<Vec<&str>, ApiError> {
        self.path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let Some(name) = segment
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
                else {
                    return Ok(segment);
                };

                let value = self
                    .path_params
                    .iter()
                    .find(|(param, _)| param == name)
                    .map(|(_, value)| value.as_str())
                    .ok_or_else(|| {
                        ApiError::InvalidRequest(format!(
                            "Missing path parameter '{name}' for '{}'",
                            self.path
                        ))
                    })?;

                if value.is_empty() {
                    return Err(ApiError::InvalidRequest(format!(
                        "Path parameter '{name}' must not be empty"
                    )));
                }
                Ok(value)
            })
            .collect()
    }
}
