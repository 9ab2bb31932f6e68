//! Tests for the service layer.

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::{Value, json};

use super::*;
use crate::client::ApiExecutor;
use crate::decode::Decode;
use crate::error::{ApiError, ErrorKind};
use crate::model::{ProductMeteredFeeUpdate, ProductMeteredTierPricing, TransactionCompletionState};
use crate::request::ApiRequest;

/// Executor that records requests and answers with scripted JSON.
#[derive(Debug, Default)]
struct ScriptedExecutor {
    replies: Mutex<VecDeque<Value>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedExecutor {
    fn replying(reply: Value) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from([reply])),
            ..Self::default()
        }
    }

    fn last_request(&self) -> ApiRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl ApiExecutor for ScriptedExecutor {
    async fn execute<R: Decode>(&self, request: ApiRequest) -> Result<R, ApiError> {
        self.requests.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().pop_front().unwrap_or(Value::Null);
        R::decode(reply).map_err(ApiError::from)
    }
}

fn query(request: &ApiRequest) -> Vec<(&str, &str)> {
    request
        .query_pairs()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

mod transaction_completion {
    use super::*;

    #[tokio::test]
    async fn complete_offline_posts_scoped_request() {
        let executor = ScriptedExecutor::replying(json!({"id": 11, "state": "PENDING"}));
        let service = TransactionCompletionService::new(&executor);

        let completion = service.complete_offline(405, 77).await.unwrap();

        assert_eq!(completion.state, Some(TransactionCompletionState::Pending));
        let request = executor.last_request();
        assert_eq!(*request.method(), http::Method::POST);
        assert_eq!(
            request.path_template(),
            "/transaction-completion/completeOffline"
        );
        assert_eq!(request.space_id(), Some(405));
        assert_eq!(query(&request), vec![("spaceId", "405"), ("id", "77")]);
    }

    #[tokio::test]
    async fn read_uses_get() {
        let executor = ScriptedExecutor::replying(json!({"id": 11}));
        let service = TransactionCompletionService::new(&executor);

        service.read(405, 11).await.unwrap();

        assert_eq!(*executor.last_request().method(), http::Method::GET);
    }

    #[tokio::test]
    async fn complete_online_targets_online_endpoint() {
        let executor = ScriptedExecutor::replying(json!({"id": 12, "state": "SUCCESSFUL"}));
        let service = TransactionCompletionService::new(&executor);

        let completion = service.complete_online(405, 78).await.unwrap();

        assert!(completion.is_final());
        assert_eq!(
            executor.last_request().path_template(),
            "/transaction-completion/completeOnline"
        );
    }
}

mod payment_page {
    use super::*;

    #[tokio::test]
    async fn returns_the_url() {
        let executor = ScriptedExecutor::replying(json!("https://app-wallee.com/s/405/payment/transaction/pay/77"));
        let service = TransactionPaymentPageService::new(&executor);

        let url = service.payment_page_url(405, 77).await.unwrap();

        assert!(url.starts_with("http"));
        assert_eq!(
            executor.last_request().path_template(),
            "/transaction-payment-page/payment-page-url"
        );
    }
}

mod product_metered_fee {
    use super::*;

    #[tokio::test]
    async fn update_sends_json_body() {
        let executor = ScriptedExecutor::replying(json!({
            "id": 5,
            "version": 4,
            "tierPricing": "CHEAPEST_TIER_PRICING"
        }));
        let service = ProductMeteredFeeService::new(&executor);
        let mut update = ProductMeteredFeeUpdate::new(5, 3);
        update.tier_pricing = Some(ProductMeteredTierPricing::CheapestTierPricing);

        let fee = service.update(405, &update).await.unwrap();

        assert_eq!(fee.version, Some(4));
        let request = executor.last_request();
        let body: Value = serde_json::from_slice(request.body().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"id": 5, "version": 3, "tierPricing": "CHEAPEST_TIER_PRICING"})
        );
    }

    #[tokio::test]
    async fn invalid_update_is_rejected_locally() {
        let executor = ScriptedExecutor::default();
        let service = ProductMeteredFeeService::new(&executor);
        let update = ProductMeteredFeeUpdate {
            id: Some(5),
            ..ProductMeteredFeeUpdate::default()
        };

        let err = service.update(405, &update).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.as_validation().unwrap().field(), Some("version"));
        assert_eq!(executor.request_count(), 0);
    }

    #[tokio::test]
    async fn read_decodes_fee() {
        let executor = ScriptedExecutor::replying(json!({"id": 5, "metric": 2}));
        let service = ProductMeteredFeeService::new(&executor);

        let fee = service.read(405, 5).await.unwrap();

        assert_eq!(fee.metric, Some(2));
    }
}

mod space {
    use super::*;

    #[tokio::test]
    async fn read_is_not_space_scoped() {
        let executor = ScriptedExecutor::replying(json!({"id": 405, "state": "ACTIVE"}));
        let service = SpaceService::new(&executor);

        let space = service.read(405).await.unwrap();

        assert_eq!(space.id, Some(405));
        let request = executor.last_request();
        assert_eq!(request.space_id(), None);
        assert_eq!(query(&request), vec![("id", "405")]);
    }
}
