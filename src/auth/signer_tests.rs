//! Tests for MAC signing.

use super::{Credentials, MAC_VERSION, canonical_string, sign};
use http::Method;

const SECRET: &str = "FKrO76r5VwJtBrqZawBspljbBNOxp5veKQQkOnZxucQ=";
const TIMESTAMP: u64 = 1_700_000_000_000;
const PATH: &str = "/api/v2.0/space/read";

fn credentials() -> Credentials {
    Credentials::new(512_u64, SECRET).unwrap()
}

fn signature_b64(method: &Method, path: &str, timestamp: u64, credentials: &Credentials) -> String {
    sign(
        method,
        path,
        timestamp,
        credentials.user_id(),
        credentials.secret(),
    )
    .to_base64()
}

mod canonical {
    use super::*;

    #[test]
    fn joins_fields_with_pipes() {
        let c = credentials();
        let canonical = canonical_string(&Method::GET, PATH, TIMESTAMP, c.user_id());

        assert_eq!(canonical, "1|512|1700000000000|GET|/api/v2.0/space/read");
    }

    #[test]
    fn starts_with_mac_version() {
        let c = credentials();
        let canonical = canonical_string(&Method::POST, PATH, TIMESTAMP, c.user_id());

        assert!(canonical.starts_with(&format!("{MAC_VERSION}|")));
    }

    #[test]
    fn strips_query_string() {
        let c = credentials();
        let with_query = canonical_string(&Method::GET, "/api/v2.0/space/read?id=7", 1, c.user_id());
        let without = canonical_string(&Method::GET, PATH, 1, c.user_id());

        assert_eq!(with_query, without);
    }

    #[test]
    fn upper_cases_extension_methods() {
        let c = credentials();
        let method = Method::from_bytes(b"purge").unwrap();
        let canonical = canonical_string(&method, PATH, 1, c.user_id());

        assert!(canonical.contains("|PURGE|"));
    }
}

mod signature {
    use super::*;

    #[test]
    fn matches_known_hmac_sha512_vector() {
        let c = credentials();

        assert_eq!(
            signature_b64(&Method::GET, PATH, TIMESTAMP, &c),
            "DsK4/LGji2mHKO2pDOHiP4jaIGMasEO0MItBvJGw2j7cP3u5rCiusGEm+4qD8TE8rcwWMTXPYNcxJtpzQlsz3g=="
        );
    }

    #[test]
    fn digest_is_64_bytes() {
        let c = credentials();
        let signature = sign(&Method::GET, PATH, TIMESTAMP, c.user_id(), c.secret());

        assert_eq!(signature.as_bytes().len(), 64);
    }

    #[test]
    fn is_deterministic() {
        let c = credentials();

        assert_eq!(
            signature_b64(&Method::POST, PATH, TIMESTAMP, &c),
            signature_b64(&Method::POST, PATH, TIMESTAMP, &c)
        );
    }

    #[test]
    fn changes_with_method() {
        let c = credentials();

        assert_ne!(
            signature_b64(&Method::GET, PATH, TIMESTAMP, &c),
            signature_b64(&Method::POST, PATH, TIMESTAMP, &c)
        );
    }

    #[test]
    fn changes_with_adjacent_paths() {
        let c = credentials();
        let paths = [
            "/api/v2.0/space/read",
            "/api/v2.0/space/reads",
            "/api/v2.0/space/rea",
            "/api/v2.0/space/read/",
            "/api/v2.0/Space/read",
        ];

        let signatures: std::collections::HashSet<String> = paths
            .iter()
            .map(|path| signature_b64(&Method::GET, path, TIMESTAMP, &c))
            .collect();

        assert_eq!(signatures.len(), paths.len());
    }

    #[test]
    fn changes_with_timestamp() {
        let c = credentials();

        assert_ne!(
            signature_b64(&Method::GET, PATH, TIMESTAMP, &c),
            signature_b64(&Method::GET, PATH, TIMESTAMP + 1, &c)
        );
    }

    #[test]
    fn changes_with_user_id() {
        let a = credentials();
        let b = Credentials::new(513_u64, SECRET).unwrap();

        assert_ne!(
            signature_b64(&Method::GET, PATH, TIMESTAMP, &a),
            signature_b64(&Method::GET, PATH, TIMESTAMP, &b)
        );
    }

    #[test]
    fn changes_with_secret() {
        let a = credentials();
        let b = Credentials::new(512_u64, "c2Vjb25kLXNlY3JldA==").unwrap();

        assert_ne!(
            signature_b64(&Method::GET, PATH, TIMESTAMP, &a),
            signature_b64(&Method::GET, PATH, TIMESTAMP, &b)
        );
    }

    #[test]
    fn debug_shows_base64() {
        let c = credentials();
        let signature = sign(&Method::GET, PATH, TIMESTAMP, c.user_id(), c.secret());

        assert_eq!(
            format!("{signature:?}"),
            format!("Signature({})", signature.to_base64())
        );
    }
}
