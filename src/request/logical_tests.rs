//! Tests for `ApiRequest`.

use std::time::Duration;

use super::ApiRequest;
use crate::error::ApiError;

mod construction {
    use super::*;

    #[test]
    fn shorthand_constructors_set_method() {
        assert_eq!(*ApiRequest::get("/a").method(), http::Method::GET);
        assert_eq!(*ApiRequest::post("/a").method(), http::Method::POST);
        assert_eq!(*ApiRequest::put("/a").method(), http::Method::PUT);
        assert_eq!(*ApiRequest::delete("/a").method(), http::Method::DELETE);
    }

    #[test]
    fn defaults_are_empty() {
        let request = ApiRequest::get("/space/read");

        assert_eq!(request.path_template(), "/space/read");
        assert!(request.query_pairs().is_empty());
        assert!(request.body().is_none());
        assert_eq!(request.space_id(), None);
        assert_eq!(request.call_timeout(), None);
    }

    #[test]
    fn query_keeps_order_and_duplicates() {
        let request = ApiRequest::get("/x").query("id", 1).query("id", 2).query("b", "c");

        let pairs: Vec<(&str, &str)> = request
            .query_pairs()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(pairs, vec![("id", "1"), ("id", "2"), ("b", "c")]);
    }

    #[test]
    fn query_opt_skips_none() {
        let request = ApiRequest::get("/x")
            .query_opt("present", Some(5))
            .query_opt("absent", None::<u64>);

        assert_eq!(request.query_pairs().len(), 1);
        assert_eq!(request.query_pairs()[0].0, "present");
    }

    #[test]
    fn space_and_timeout_are_recorded() {
        let request = ApiRequest::get("/x")
            .space(405)
            .timeout(Duration::from_secs(3));

        assert_eq!(request.space_id(), Some(405));
        assert_eq!(request.call_timeout(), Some(Duration::from_secs(3)));
    }
}

mod body {
    use super::*;

    #[test]
    fn json_serializes_once() {
        let request = ApiRequest::post("/x")
            .json(&serde_json::json!({"id": 1, "version": 2}))
            .unwrap();

        let body: serde_json::Value = serde_json::from_slice(request.body().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"id": 1, "version": 2}));
    }

    #[test]
    fn json_reports_unserializable_body() {
        let mut map = std::collections::HashMap::new();
        map.insert(vec![1_u8], "non-string key");

        let result = ApiRequest::post("/x").json(&map);

        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn raw_json_is_kept_verbatim() {
        let request = ApiRequest::post("/x").raw_json(r#"{"a":1}"#.as_bytes().to_vec());

        assert_eq!(&request.body().unwrap()[..], br#"{"a":1}"#);
    }
}

mod path_segments {
    use super::*;

    #[test]
    fn literal_template_splits_on_slash() {
        let request = ApiRequest::get("/transaction-completion/completeOffline");

        assert_eq!(
            request.path_segments().unwrap(),
            vec!["transaction-completion", "completeOffline"]
        );
    }

    #[test]
    fn placeholders_are_filled() {
        let request = ApiRequest::get("/space/{id}/users/{user}")
            .path_param("id", 405)
            .path_param("user", "a b");

        assert_eq!(
            request.path_segments().unwrap(),
            vec!["space", "405", "users", "a b"]
        );
    }

    #[test]
    fn missing_placeholder_is_invalid_request() {
        let request = ApiRequest::get("/space/{id}");

        let err = request.path_segments().unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(msg) if msg.contains("'id'")));
    }

    #[test]
    fn empty_placeholder_value_is_invalid_request() {
        let request = ApiRequest::get("/space/{id}").path_param("id", "");

        assert!(matches!(
            request.path_segments(),
            Err(ApiError::InvalidRequest(_))
        ));
    }
}
