//! The call pipeline: build, sign, send, decode, retry.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::{ClientConfig, RetryDecision, RetryPolicy};
use crate::decode::{Decode, ResponseDecoder};
use crate::error::{ApiError, TimeoutStage};
use crate::request::{ApiRequest, RequestBuilder};
use crate::time::{Clock, Sleeper, SystemClock, TokioSleeper};
use crate::transport::{Backend, Transport};

/// Executes API calls on behalf of generated services.
///
/// Services hold an `ApiExecutor` rather than a concrete client, so tests
/// can substitute a scripted one.
pub trait ApiExecutor: Send + Sync {
    /// Runs `request` and decodes the response as `R`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the call fails after all permitted attempts.
    fn execute<R: Decode>(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<R, ApiError>> + Send;
}

impl<E: ApiExecutor> ApiExecutor for Arc<E> {
    async fn execute<R: Decode>(&self, request: ApiRequest) -> Result<R, ApiError> {
        (**self).execute(request).await
    }
}

impl<E: ApiExecutor> ApiExecutor for &E {
    async fn execute<R: Decode>(&self, request: ApiRequest) -> Result<R, ApiError> {
        (**self).execute(request).await
    }
}

/// Signed-request client for the payment API.
///
/// One client serves any number of concurrent calls: `execute` takes
/// `&self` and keeps all per-call state local. Share it via [`Arc`] or by
/// reference.
///
/// # Type Parameters
///
/// - `T`: The transport (defaults to the configured [`Backend`])
/// - `S`: The sleeper for retry delays (defaults to [`TokioSleeper`])
/// - `C`: The clock stamping signatures (defaults to [`SystemClock`])
///
/// # Example
///
/// ```no_run
/// use wallee_sdk::auth::Credentials;
/// use wallee_sdk::client::{ApiClient, ClientConfig};
/// use wallee_sdk::model::Space;
/// use wallee_sdk::request::ApiRequest;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new(512_u64, "FKrO76r5VwJtBrqZawBspljbBNOxp5veKQQkOnZxucQ=")?;
/// let client = ApiClient::from_config(ClientConfig::new(credentials))?;
/// let space: Space = client
///     .execute(ApiRequest::get("/space/read").query("id", 405))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ApiClient<T = Backend, S = TokioSleeper, C = SystemClock> {
    transport: T,
    sleeper: S,
    clock: C,
    builder: RequestBuilder,
    decoder: ResponseDecoder,
    retry_policy: RetryPolicy,
    read_timeout: Duration,
    call_timeout: Option<Duration>,
}

impl ApiClient {
    /// Builds a client with the backend named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the backend cannot be set up
    /// (for example, no usable TLS root certificates).
    pub fn from_config(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = Backend::build(config.backend, &config.transport_options())?;
        tracing::debug!(backend = %config.backend, base_url = %config.base_url, "API client ready");
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: Transport> ApiClient<T> {
    /// Builds a client around an existing transport.
    ///
    /// Backend-related settings in `config` are ignored.
    #[must_use]
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        let builder = RequestBuilder::new(config.base_url, config.api_version, config.credentials)
            .with_default_headers(config.default_headers);
        Self {
            transport,
            sleeper: TokioSleeper,
            clock: SystemClock,
            builder,
            decoder: ResponseDecoder::new(),
            retry_policy: config.retry_policy,
            read_timeout: config.read_timeout,
            call_timeout: config.call_timeout,
        }
    }
}

impl<T, S, C> ApiClient<T, S, C> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> ApiClient<T, S2, C> {
        ApiClient {
            transport: self.transport,
            sleeper,
            clock: self.clock,
            builder: self.builder,
            decoder: self.decoder,
            retry_policy: self.retry_policy,
            read_timeout: self.read_timeout,
            call_timeout: self.call_timeout,
        }
    }

    /// Sets the clock used to timestamp signatures.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> ApiClient<T, S, C2> {
        ApiClient {
            transport: self.transport,
            sleeper: self.sleeper,
            clock,
            builder: self.builder,
            decoder: self.decoder,
            retry_policy: self.retry_policy,
            read_timeout: self.read_timeout,
            call_timeout: self.call_timeout,
        }
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the request builder.
    #[must_use]
    pub const fn request_builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Returns the configured retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }
}

impl<T: Transport, S: Sleeper, C: Clock> ApiClient<T, S, C> {
    /// Runs `request` and decodes the response as `R`.
    ///
    /// Every attempt builds and signs a fresh request with the current
    /// time. Transient failures are retried per the [`RetryPolicy`]; the
    /// request's own timeout, else the configured call timeout, bounds the
    /// whole call.
    ///
    /// # Errors
    ///
    /// Returns the last attempt's [`ApiError`], or
    /// [`ApiError::Timeout`] with [`TimeoutStage::Deadline`] when the call
    /// deadline expires first.
    pub async fn execute<R: Decode>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let Some(limit) = request.call_timeout().or(self.call_timeout) else {
            return self.execute_with_retry(&request).await;
        };

        tokio::time::timeout(limit, self.execute_with_retry(&request))
            .await
            .unwrap_or_else(|_| {
                tracing::warn!(
                    method = %request.method(),
                    path = request.path_template(),
                    ?limit,
                    "call deadline expired"
                );
                Err(ApiError::Timeout(TimeoutStage::Deadline))
            })
    }

    /// Executes a single attempt.
    async fn attempt<R: Decode>(&self, request: &ApiRequest, attempt: u32) -> Result<R, ApiError> {
        let signed = self.builder.build(request, self.clock.epoch_millis())?;
        tracing::debug!(method = %signed.method(), url = %signed.url(), attempt, "sending request");

        let response = self.transport.send(&signed, self.read_timeout).await?;
        tracing::debug!(status = %response.status, bytes = response.body.len(), "received response");

        self.decoder.decode(&response)
    }

    /// Executes with retry logic.
    async fn execute_with_retry<R: Decode>(&self, request: &ApiRequest) -> Result<R, ApiError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let error = match self.attempt(request, attempt).await {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };

            match self.retry_policy.decide(attempt, &error) {
                RetryDecision::RetryAfter(delay) => {
                    tracing::warn!(attempt, ?delay, error = %error, "attempt failed, retrying");
                    self.sleeper.sleep(delay).await;
                }
                RetryDecision::GiveUp => {
                    if attempt > 1 {
                        tracing::warn!(attempts = attempt, error = %error, "giving up");
                    }
                    return Err(error);
                }
            }
        }
    }
}

impl<T: Transport, S: Sleeper, C: Clock> ApiExecutor for ApiClient<T, S, C> {
    async fn execute<R: Decode>(&self, request: ApiRequest) -> Result<R, ApiError> {
        Self::execute(self, request).await
    }
}
