//! Tests for CLI argument parsing.

use std::path::PathBuf;

use super::cli::{Cli, Command};

mod parsing {
    use super::*;

    #[test]
    fn parse_minimal_args() {
        let cli = Cli::parse_from_iter(["wallee", "space", "405"]);

        assert!(matches!(cli.command, Command::Space { id: 405 }));
        assert!(cli.base_url.is_none());
        assert!(cli.headers.is_empty());
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_connection_options() {
        let cli = Cli::parse_from_iter([
            "wallee",
            "--base-url",
            "https://staging.example.com",
            "--api-version",
            "v2.1",
            "--user-id",
            "512",
            "--secret",
            "c2VjcmV0",
            "--space-id",
            "405",
            "space",
            "405",
        ]);

        assert_eq!(cli.base_url.as_deref(), Some("https://staging.example.com"));
        assert_eq!(cli.api_version.as_deref(), Some("v2.1"));
        assert_eq!(cli.user_id.as_deref(), Some("512"));
        assert_eq!(cli.secret.as_deref(), Some("c2VjcmV0"));
        assert_eq!(cli.space_id, Some(405));
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "wallee",
            "payment-page-url",
            "77",
            "--backend",
            "socket",
            "--call-timeout",
            "30",
            "-v",
        ]);

        assert!(matches!(
            cli.command,
            Command::PaymentPageUrl { transaction: 77 }
        ));
        assert_eq!(cli.backend.as_deref(), Some("socket"));
        assert_eq!(cli.call_timeout, Some(30));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_timeouts_and_retry() {
        let cli = Cli::parse_from_iter([
            "wallee",
            "--connect-timeout",
            "5",
            "--read-timeout",
            "15",
            "--retry-max",
            "4",
            "--retry-delay",
            "250",
            "space",
            "1",
        ]);

        assert_eq!(cli.connect_timeout, Some(5));
        assert_eq!(cli.read_timeout, Some(15));
        assert_eq!(cli.retry_max, Some(4));
        assert_eq!(cli.retry_delay, Some(250));
    }

    #[test]
    fn parse_multiple_headers() {
        let cli = Cli::parse_from_iter([
            "wallee",
            "--header",
            "X-Trace=abc",
            "--header",
            "X-Tenant: blue",
            "space",
            "1",
        ]);

        assert_eq!(cli.headers, vec!["X-Trace=abc", "X-Tenant: blue"]);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from_iter(["wallee", "-c", "/etc/wallee.toml", "space", "1"]);

        assert_eq!(cli.config, Some(PathBuf::from("/etc/wallee.toml")));
    }
}

mod subcommands {
    use super::*;

    #[test]
    fn init_defaults_output() {
        let cli = Cli::parse_from_iter(["wallee", "init"]);

        assert!(cli.is_init());
        match cli.command {
            Command::Init { output } => assert_eq!(output, PathBuf::from("wallee.toml")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn init_custom_output() {
        let cli = Cli::parse_from_iter(["wallee", "init", "--output", "custom.toml"]);

        match cli.command {
            Command::Init { output } => assert_eq!(output, PathBuf::from("custom.toml")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn call_defaults_to_get() {
        let cli = Cli::parse_from_iter(["wallee", "call", "/space/read", "-q", "id=405"]);

        assert!(!cli.is_init());
        match cli.command {
            Command::Call {
                path,
                method,
                query,
                body,
            } => {
                assert_eq!(path, "/space/read");
                assert_eq!(method, "GET");
                assert_eq!(query, vec!["id=405"]);
                assert!(body.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn call_with_method_and_body() {
        let cli = Cli::parse_from_iter([
            "wallee",
            "call",
            "/subscription-product-metered-fee/update",
            "-X",
            "POST",
            "--body",
            r#"{"id":1,"version":2}"#,
        ]);

        match cli.command {
            Command::Call { method, body, .. } => {
                assert_eq!(method, "POST");
                assert_eq!(body.as_deref(), Some(r#"{"id":1,"version":2}"#));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn complete_offline_takes_transaction() {
        let cli = Cli::parse_from_iter(["wallee", "complete-offline", "12"]);

        assert!(matches!(
            cli.command,
            Command::CompleteOffline { transaction: 12 }
        ));
    }
}
