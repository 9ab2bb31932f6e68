//! Generated service layer.
//!
//! Each service is a thin typed wrapper that turns one API operation into an
//! [`ApiRequest`](crate::request::ApiRequest) and hands it to an
//! [`ApiExecutor`](crate::client::ApiExecutor). Services hold the executor
//! by value; pass `&client` or an `Arc` to share one client.

mod product_metered_fee;
mod space;
mod transaction_completion;
mod transaction_payment_page;

#[cfg(test)]
mod service_tests;

pub use product_metered_fee::ProductMeteredFeeService;
pub use space::SpaceService;
pub use transaction_completion::TransactionCompletionService;
pub use transaction_payment_page::TransactionPaymentPageService;
