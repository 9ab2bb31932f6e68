//! Turns logical requests into signed wire requests.

use http::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use url::Url;

use super::ApiRequest;
use crate::auth::{self, Credentials, MAC_VERSION};
use crate::error::ApiError;
use crate::transport::SignedRequest;

/// Header names used on every request.
pub mod header {
    use http::HeaderName;

    /// Version of the MAC canonical string layout.
    pub const MAC_VERSION: HeaderName = HeaderName::from_static("x-mac-version");
    /// Principal id of the caller.
    pub const MAC_USER_ID: HeaderName = HeaderName::from_static("x-mac-userid");
    /// Epoch milliseconds the signature was computed for.
    pub const MAC_TIMESTAMP: HeaderName = HeaderName::from_static("x-mac-timestamp");
    /// `{user_id}:{base64 signature}`.
    pub const MAC_VALUE: HeaderName = HeaderName::from_static("x-mac-value");
    /// Space (tenant) the call is scoped to.
    pub const SPACE_ID: HeaderName = HeaderName::from_static("x-space-id");
    /// SDK version metadata.
    pub const SDK_VERSION: HeaderName = HeaderName::from_static("x-meta-sdk-version");
    /// SDK language metadata.
    pub const SDK_LANGUAGE: HeaderName = HeaderName::from_static("x-meta-sdk-language");
    /// SDK provider metadata.
    pub const SDK_PROVIDER: HeaderName = HeaderName::from_static("x-meta-sdk-provider");
}

const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
const USER_AGENT_VALUE: &str = concat!("wallee-sdk-rust/", env!("CARGO_PKG_VERSION"));
const JSON: &str = "application/json";

/// Builds and signs [`SignedRequest`]s for one API endpoint and principal.
///
/// URLs have the form `{base_url}/api/{api_version}/{resource-path}?{query}`.
/// The signature covers the method, the encoded path that is actually sent,
/// the caller's user id and the supplied timestamp.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: Url,
    api_version: String,
    credentials: Credentials,
    default_headers: HeaderMap,
}

impl RequestBuilder {
    /// Creates a builder for the given endpoint and credentials.
    #[must_use]
    pub fn new(base_url: Url, api_version: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url,
            api_version: api_version.into(),
            credentials,
            default_headers: HeaderMap::new(),
        }
    }

    /// Sets extra headers sent with every request.
    ///
    /// Content negotiation and authentication headers always win over these.
    #[must_use]
    pub fn with_default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers = headers;
        self
    }

    /// Returns the credentials requests are signed with.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the absolute URL `request` is sent to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for missing path parameters or a
    /// base URL that cannot carry a path.
    pub fn url_for(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let resource = request.path_segments()?;

        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                ApiError::InvalidRequest(format!("Base URL '{}' cannot carry a path", self.base_url))
            })?;
            segments
                .pop_if_empty()
                .push("api")
                .push(&self.api_version)
                .extend(resource);
        }

        if !request.query_pairs().is_empty() {
            url.query_pairs_mut().extend_pairs(request.query_pairs());
        }

        Ok(url)
    }

    /// Builds the signed request for `request` at `timestamp_ms`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the URL cannot be built.
    pub fn build(&self, request: &ApiRequest, timestamp_ms: u64) -> Result<SignedRequest, ApiError> {
        let url = self.url_for(request)?;
        let user_id = self.credentials.user_id();

        let signature = auth::sign(
            request.method(),
            url.path(),
            timestamp_ms,
            user_id,
            self.credentials.secret(),
        );

        let mut headers = self.default_headers.clone();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(header::SDK_VERSION, HeaderValue::from_static(SDK_VERSION));
        headers.insert(header::SDK_LANGUAGE, HeaderValue::from_static("rust"));
        headers.insert(header::SDK_PROVIDER, HeaderValue::from_static("wallee"));

        headers.insert(header::MAC_VERSION, HeaderValue::from(MAC_VERSION));
        headers.insert(header::MAC_USER_ID, header_value(user_id.as_str())?);
        headers.insert(header::MAC_TIMESTAMP, HeaderValue::from(timestamp_ms));
        headers.insert(
            header::MAC_VALUE,
            header_value(&format!("{user_id}:{}", signature.to_base64()))?,
        );

        if let Some(space_id) = request.space_id() {
            headers.insert(header::SPACE_ID, HeaderValue::from(space_id));
        }

        tracing::trace!(method = %request.method(), %url, timestamp_ms, "signed request");

        Ok(SignedRequest::new(
            request.method().clone(),
            url,
            headers,
            request.body().cloned(),
        ))
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value)
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid header value '{value}': {e}")))
}
