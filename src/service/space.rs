use crate::client::ApiExecutor;
use crate::error::ApiError;
use crate::model::Space;
use crate::request::ApiRequest;

/// Spaces of the account.
#[derive(Debug, Clone)]
pub struct SpaceService<E> {
    executor: E,
}

impl<E: ApiExecutor> SpaceService<E> {
    /// Creates the service.
    #[must_use]
    pub const fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Reads space `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails.
    pub async fn read(&self, id: u64) -> Result<Space, ApiError> {
        self.executor
            .execute(ApiRequest::get("/space/read").query("id", id))
            .await
    }
}
