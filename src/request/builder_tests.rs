//! Tests for `RequestBuilder`.

use http::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use url::Url;

use super::{ApiRequest, RequestBuilder, header};
use crate::auth::{self, Credentials};
use crate::error::ApiError;

const SECRET: &str = "FKrO76r5VwJtBrqZawBspljbBNOxp5veKQQkOnZxucQ=";
const TIMESTAMP: u64 = 1_700_000_000_000;

fn builder() -> RequestBuilder {
    RequestBuilder::new(
        Url::parse("https://app-wallee.com").unwrap(),
        "v2.0",
        Credentials::new(512_u64, SECRET).unwrap(),
    )
}

fn header_str<'a>(headers: &'a HeaderMap, name: &http::HeaderName) -> &'a str {
    headers.get(name).unwrap().to_str().unwrap()
}

mod url_layout {
    use super::*;

    #[test]
    fn prefixes_api_and_version() {
        let url = builder().url_for(&ApiRequest::get("/space/read")).unwrap();

        assert_eq!(url.as_str(), "https://app-wallee.com/api/v2.0/space/read");
    }

    #[test]
    fn appends_query_string() {
        let url = builder()
            .url_for(&ApiRequest::get("/space/read").query("id", 7).query("q", "a&b"))
            .unwrap();

        assert_eq!(url.path(), "/api/v2.0/space/read");
        assert_eq!(url.query(), Some("id=7&q=a%26b"));
    }

    #[test]
    fn keeps_base_path_prefix() {
        let builder = RequestBuilder::new(
            Url::parse("https://proxy.example.com/wallee/").unwrap(),
            "v2.0",
            Credentials::new(1_u64, SECRET).unwrap(),
        );

        let url = builder.url_for(&ApiRequest::get("/space/read")).unwrap();

        assert_eq!(url.path(), "/wallee/api/v2.0/space/read");
    }

    #[test]
    fn encodes_path_parameters() {
        let url = builder()
            .url_for(&ApiRequest::get("/label/{name}").path_param("name", "a b/c"))
            .unwrap();

        assert_eq!(url.path(), "/api/v2.0/label/a%20b%2Fc");
    }

    #[test]
    fn missing_path_parameter_fails() {
        let result = builder().url_for(&ApiRequest::get("/label/{name}"));

        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn base_without_path_support_fails() {
        let builder = RequestBuilder::new(
            Url::parse("mailto:ops@example.com").unwrap(),
            "v2.0",
            Credentials::new(1_u64, SECRET).unwrap(),
        );

        let result = builder.url_for(&ApiRequest::get("/space/read"));

        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
    }
}

mod signing {
    use super::*;

    #[test]
    fn carries_mac_headers() {
        let signed = builder()
            .build(&ApiRequest::get("/space/read").query("id", 7), TIMESTAMP)
            .unwrap();
        let headers = signed.headers();

        assert_eq!(header_str(headers, &header::MAC_VERSION), "1");
        assert_eq!(header_str(headers, &header::MAC_USER_ID), "512");
        assert_eq!(header_str(headers, &header::MAC_TIMESTAMP), "1700000000000");
        assert_eq!(
            header_str(headers, &header::MAC_VALUE),
            "512:DsK4/LGji2mHKO2pDOHiP4jaIGMasEO0MItBvJGw2j7cP3u5rCiusGEm+4qD8TE8rcwWMTXPYNcxJtpzQlsz3g=="
        );
    }

    #[test]
    fn signature_covers_transmitted_path() {
        let credentials = Credentials::new(512_u64, SECRET).unwrap();
        let signed = builder()
            .build(
                &ApiRequest::post("/label/{name}").path_param("name", "a b"),
                TIMESTAMP,
            )
            .unwrap();

        let expected = auth::sign(
            &http::Method::POST,
            signed.url().path(),
            TIMESTAMP,
            credentials.user_id(),
            credentials.secret(),
        );
        assert_eq!(
            header_str(signed.headers(), &header::MAC_VALUE),
            format!("512:{}", expected.to_base64())
        );
    }

    #[test]
    fn new_timestamp_gives_new_signature() {
        let request = ApiRequest::get("/space/read");
        let first = builder().build(&request, TIMESTAMP).unwrap();
        let second = builder().build(&request, TIMESTAMP + 1_000).unwrap();

        assert_ne!(
            first.headers().get(&header::MAC_VALUE),
            second.headers().get(&header::MAC_VALUE)
        );
    }

    #[test]
    fn sets_content_negotiation_headers() {
        let signed = builder().build(&ApiRequest::get("/x"), TIMESTAMP).unwrap();
        let headers = signed.headers();

        assert_eq!(header_str(headers, &CONTENT_TYPE), "application/json");
        assert_eq!(header_str(headers, &ACCEPT), "application/json");
        assert!(header_str(headers, &USER_AGENT).starts_with("wallee-sdk-rust/"));
        assert_eq!(header_str(headers, &header::SDK_LANGUAGE), "rust");
    }

    #[test]
    fn space_header_only_when_scoped() {
        let unscoped = builder().build(&ApiRequest::get("/x"), TIMESTAMP).unwrap();
        let scoped = builder()
            .build(&ApiRequest::get("/x").space(405), TIMESTAMP)
            .unwrap();

        assert!(unscoped.headers().get(&header::SPACE_ID).is_none());
        assert_eq!(header_str(scoped.headers(), &header::SPACE_ID), "405");
    }

    #[test]
    fn default_headers_cannot_override_authentication() {
        let mut defaults = HeaderMap::new();
        defaults.insert(header::MAC_USER_ID, HeaderValue::from_static("999"));
        defaults.insert("x-correlation", HeaderValue::from_static("abc"));

        let signed = builder()
            .with_default_headers(defaults)
            .build(&ApiRequest::get("/x"), TIMESTAMP)
            .unwrap();

        assert_eq!(header_str(signed.headers(), &header::MAC_USER_ID), "512");
        assert_eq!(
            signed.headers().get("x-correlation").unwrap(),
            &HeaderValue::from_static("abc")
        );
    }

    #[test]
    fn body_is_passed_through_unchanged() {
        let request = ApiRequest::post("/x").raw_json(b"{\"id\":1}".to_vec());
        let signed = builder().build(&request, TIMESTAMP).unwrap();

        assert_eq!(&signed.body().unwrap()[..], b"{\"id\":1}");
        assert_eq!(*signed.method(), http::Method::POST);
    }
}
