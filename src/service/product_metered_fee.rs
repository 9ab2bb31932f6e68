use crate::client::ApiExecutor;
use crate::decode::Model;
use crate::error::{ApiError, ValidationFailure};
use crate::model::{ProductMeteredFee, ProductMeteredFeeUpdate};
use crate::request::ApiRequest;

/// Metered fees of subscription products.
#[derive(Debug, Clone)]
pub struct ProductMeteredFeeService<E> {
    executor: E,
}

impl<E: ApiExecutor> ProductMeteredFeeService<E> {
    /// Creates the service.
    #[must_use]
    pub const fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Reads fee `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails.
    pub async fn read(&self, space_id: u64, id: i64) -> Result<ProductMeteredFee, ApiError> {
        let request = ApiRequest::get("/subscription-product-metered-fee/read")
            .space(space_id)
            .query("spaceId", space_id)
            .query("id", id);
        self.executor.execute(request).await
    }

    /// Applies `entity` to the stored fee.
    ///
    /// The update is validated before anything is sent.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] if `entity` lacks `id` or `version`
    /// - [`ApiError::Client`] with status 409 if the fee changed since
    ///   `version` was read
    /// - any other [`ApiError`] if the call fails
    pub async fn update(
        &self,
        space_id: u64,
        entity: &ProductMeteredFeeUpdate,
    ) -> Result<ProductMeteredFee, ApiError> {
        let violations = entity.validate();
        if !violations.is_empty() {
            return Err(ApiError::Validation(Box::new(ValidationFailure::new(
                ProductMeteredFeeUpdate::NAME,
                entity.clone(),
                violations,
            ))));
        }

        let request = ApiRequest::post("/subscription-product-metered-fee/update")
            .space(space_id)
            .query("spaceId", space_id)
            .json(entity)?;
        self.executor.execute(request).await
    }
}
