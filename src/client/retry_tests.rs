//! Tests for `RetryPolicy`.

use super::{IsRetryable, RetryDecision, RetryPolicy};
use crate::error::{ApiError, ClientFailure, ProtocolError, TimeoutStage};
use std::time::Duration;

fn server_error(retry_after: Option<Duration>) -> ApiError {
    ApiError::Server {
        status: http::StatusCode::SERVICE_UNAVAILABLE,
        body: None,
        retry_after,
    }
}

fn client_error(status: u16, retry_after: Option<Duration>) -> ApiError {
    ApiError::Client(ClientFailure {
        status: http::StatusCode::from_u16(status).unwrap(),
        message: "rejected".to_string(),
        field: None,
        body: None,
        retry_after,
    })
}

mod retry_policy_defaults {
    use super::*;

    #[test]
    fn new_creates_policy_with_defaults() {
        let policy = RetryPolicy::new();

        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_delay, Duration::from_millis(500));
        assert_eq!(policy.max_delay, Duration::from_secs(10));
        assert!((policy.multiplier - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn default_trait_matches_new() {
        assert_eq!(RetryPolicy::new(), RetryPolicy::default());
    }

    #[test]
    fn none_makes_a_single_attempt() {
        let policy = RetryPolicy::none();

        assert_eq!(policy.max_attempts, 1);
        assert!(!policy.should_retry(1));
    }
}

mod retry_policy_builder {
    use super::*;

    #[test]
    #[should_panic(expected = "max_attempts must be at least 1")]
    fn with_max_attempts_zero_panics() {
        let _ = RetryPolicy::new().with_max_attempts(0);
    }

    #[test]
    #[should_panic(expected = "multiplier must be greater than 1.0")]
    fn with_multiplier_zero_panics() {
        let _ = RetryPolicy::new().with_multiplier(0.0);
    }

    #[test]
    #[should_panic(expected = "multiplier must be greater than 1.0")]
    fn with_shrinking_multiplier_panics() {
        let _ = RetryPolicy::new().with_multiplier(0.5);
    }

    #[test]
    #[should_panic(expected = "multiplier must be greater than 1.0")]
    fn with_constant_multiplier_panics() {
        let _ = RetryPolicy::new().with_multiplier(1.0);
    }

    #[test]
    fn builder_chains_correctly() {
        let policy = RetryPolicy::new()
            .with_max_attempts(10)
            .with_initial_delay(Duration::from_millis(250))
            .with_max_delay(Duration::from_secs(30))
            .with_multiplier(3.0);

        assert_eq!(policy.max_attempts, 10);
        assert_eq!(policy.initial_delay, Duration::from_millis(250));
        assert_eq!(policy.max_delay, Duration::from_secs(30));
        assert!((policy.multiplier - 3.0).abs() < f64::EPSILON);
    }
}

mod delay_for_retry {
    use super::*;

    #[test]
    fn grows_exponentially() {
        let policy = RetryPolicy::new()
            .with_initial_delay(Duration::from_secs(5))
            .with_multiplier(2.0)
            .with_max_delay(Duration::from_secs(600));

        assert_eq!(policy.delay_for_retry(0), Duration::from_secs(5));
        assert_eq!(policy.delay_for_retry(1), Duration::from_secs(10));
        assert_eq!(policy.delay_for_retry(2), Duration::from_secs(20));
    }

    #[test]
    fn delay_is_capped_at_max() {
        let policy = RetryPolicy::new()
            .with_initial_delay(Duration::from_secs(10))
            .with_max_delay(Duration::from_secs(30))
            .with_multiplier(2.0);

        // Retry 2: 10 * 2^2 = 40 -> capped at 30
        assert_eq!(policy.delay_for_retry(2), Duration::from_secs(30));
        assert_eq!(policy.delay_for_retry(u32::MAX), Duration::from_secs(30));
    }

    #[test]
    fn fractional_multiplier_works() {
        let policy = RetryPolicy::new()
            .with_initial_delay(Duration::from_secs(4))
            .with_multiplier(1.5);

        assert_eq!(policy.delay_for_retry(1), Duration::from_secs(6));
        assert_eq!(policy.delay_for_retry(2), Duration::from_secs(9));
    }

    #[test]
    fn unbounded_max_delay_does_not_panic() {
        let policy = RetryPolicy::new()
            .with_initial_delay(Duration::from_secs(1))
            .with_max_delay(Duration::MAX);

        assert_eq!(policy.delay_for_retry(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for_retry(u32::MAX), Duration::MAX);
    }

    #[test]
    fn delays_strictly_increase_until_capped() {
        let policy = RetryPolicy::new()
            .with_initial_delay(Duration::from_millis(100))
            .with_multiplier(1.1)
            .with_max_delay(Duration::from_secs(3600));

        for retry in 0..20 {
            assert!(
                policy.delay_for_retry(retry + 1) > policy.delay_for_retry(retry),
                "retry {retry}"
            );
        }
    }
}

mod should_retry {
    use super::*;

    #[test]
    fn stops_at_max_attempts() {
        let policy = RetryPolicy::new().with_max_attempts(3);

        assert!(policy.should_retry(1));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));
        assert!(!policy.should_retry(100));
    }
}

mod decide {
    use super::*;

    #[test]
    fn transient_errors_back_off_exponentially() {
        let policy = RetryPolicy::new().with_max_attempts(4);
        let error = ApiError::Connection("reset".into());

        assert_eq!(
            policy.decide(1, &error),
            RetryDecision::RetryAfter(Duration::from_millis(500))
        );
        assert_eq!(
            policy.decide(2, &error),
            RetryDecision::RetryAfter(Duration::from_secs(1))
        );
        assert_eq!(
            policy.decide(3, &error),
            RetryDecision::RetryAfter(Duration::from_secs(2))
        );
        assert_eq!(policy.decide(4, &error), RetryDecision::GiveUp);
    }

    #[test]
    fn permanent_errors_give_up_immediately() {
        let policy = RetryPolicy::new().with_max_attempts(5);

        assert_eq!(policy.decide(1, &client_error(400, None)), RetryDecision::GiveUp);
        assert_eq!(
            policy.decide(1, &ApiError::InvalidRequest("bad".into())),
            RetryDecision::GiveUp
        );
    }

    #[test]
    fn server_hint_lengthens_the_wait() {
        let policy = RetryPolicy::new();

        assert_eq!(
            policy.decide(1, &server_error(Some(Duration::from_secs(3)))),
            RetryDecision::RetryAfter(Duration::from_secs(3))
        );
    }

    #[test]
    fn server_hint_never_shortens_the_wait() {
        let policy = RetryPolicy::new().with_initial_delay(Duration::from_secs(2));

        assert_eq!(
            policy.decide(1, &client_error(429, Some(Duration::from_secs(1)))),
            RetryDecision::RetryAfter(Duration::from_secs(2))
        );
    }

    #[test]
    fn server_hint_is_capped() {
        let policy = RetryPolicy::new();

        assert_eq!(
            policy.decide(1, &server_error(Some(Duration::from_secs(3600)))),
            RetryDecision::RetryAfter(Duration::from_secs(10))
        );
    }
}

mod is_retryable {
    use super::*;

    #[test]
    fn transient_failures_are_retryable() {
        assert!(ApiError::Connection("refused".into()).is_retryable());
        assert!(ApiError::Timeout(TimeoutStage::Connect).is_retryable());
        assert!(ApiError::Timeout(TimeoutStage::Response).is_retryable());
        assert!(server_error(None).is_retryable());
        assert!(client_error(429, None).is_retryable());
        assert!(client_error(408, None).is_retryable());
    }

    #[test]
    fn permanent_failures_are_not_retryable() {
        assert!(!ApiError::Tls("unknown issuer".into()).is_retryable());
        assert!(!ApiError::Timeout(TimeoutStage::Deadline).is_retryable());
        assert!(!client_error(400, None).is_retryable());
        assert!(!client_error(409, None).is_retryable());
        assert!(!ApiError::Protocol(ProtocolError::Http("garbage".into())).is_retryable());
        assert!(!ApiError::InvalidRequest("bad".into()).is_retryable());
    }
}
