use crate::client::ApiExecutor;
use crate::error::ApiError;
use crate::model::TransactionCompletion;
use crate::request::ApiRequest;

/// Completion (capture) of authorized transactions.
#[derive(Debug, Clone)]
pub struct TransactionCompletionService<E> {
    executor: E,
}

impl<E: ApiExecutor> TransactionCompletionService<E> {
    /// Creates the service.
    #[must_use]
    pub const fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Reads completion `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails.
    pub async fn read(&self, space_id: u64, id: i64) -> Result<TransactionCompletion, ApiError> {
        self.executor
            .execute(scoped(ApiRequest::get("/transaction-completion/read"), space_id, id))
            .await
    }

    /// Completes transaction `id` without contacting the processor.
    ///
    /// Used when the capture already happened outside the platform.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails.
    pub async fn complete_offline(
        &self,
        space_id: u64,
        id: i64,
    ) -> Result<TransactionCompletion, ApiError> {
        self.executor
            .execute(scoped(
                ApiRequest::post("/transaction-completion/completeOffline"),
                space_id,
                id,
            ))
            .await
    }

    /// Completes transaction `id` through the processor.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails.
    pub async fn complete_online(
        &self,
        space_id: u64,
        id: i64,
    ) -> Result<TransactionCompletion, ApiError> {
        self.executor
            .execute(scoped(
                ApiRequest::post("/transaction-completion/completeOnline"),
                space_id,
                id,
            ))
            .await
    }
}

fn scoped(request: ApiRequest, space_id: u64, id: i64) -> ApiRequest {
    request
        .space(space_id)
        .query("spaceId", space_id)
        .query("id", id)
}
