use crate::client::ApiExecutor;
use crate::error::ApiError;
use crate::request::ApiRequest;

/// Hosted payment page of a transaction.
#[derive(Debug, Clone)]
pub struct TransactionPaymentPageService<E> {
    executor: E,
}

impl<E: ApiExecutor> TransactionPaymentPageService<E> {
    /// Creates the service.
    #[must_use]
    pub const fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Returns the URL the buyer is redirected to in order to pay
    /// transaction `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails.
    pub async fn payment_page_url(&self, space_id: u64, id: i64) -> Result<String, ApiError> {
        let request = ApiRequest::get("/transaction-payment-page/payment-page-url")
            .space(space_id)
            .query("spaceId", space_id)
            .query("id", id);
        self.executor.execute(request).await
    }
}
