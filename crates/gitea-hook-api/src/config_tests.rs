//! Tests for [`ServiceConfig`] defaults, validation and loading.

use super::*;
use serial_test::serial;
use std::io::Write;

// ============================================================================
// Defaults and validation
// ============================================================================

mod validation_tests {
    use super::*;

    /// Verify that the default configuration is runnable.
    #[test]
    fn test_default_config_is_valid() {
        let config = ServiceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.endpoint_path, "/gitea/webhooks");
        assert_eq!(config.server.port, 8080);
        assert!(config.webhook.secret.is_none());
    }

    /// Verify that the default subscription covers every implemented kind.
    #[test]
    fn test_default_events_are_implemented_kinds() {
        let config = ServiceConfig::default();
        assert_eq!(
            config.webhook.events,
            vec![
                "create",
                "delete",
                "fork",
                "push",
                "issues",
                "pull_request",
                "repository",
                "release"
            ]
        );
    }

    #[test]
    fn test_empty_event_list_fails() {
        let mut config = ServiceConfig::default();
        config.webhook.events.clear();

        let err = config.validate().unwrap_err();
        assert!(
            matches!(&err, ConfigError::Invalid { message } if message.contains("webhook.events")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn test_blank_event_name_fails() {
        let mut config = ServiceConfig::default();
        config.webhook.events.push("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_relative_endpoint_path_fails() {
        let mut config = ServiceConfig::default();
        config.server.endpoint_path = "gitea/webhooks".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_port_fails() {
        let mut config = ServiceConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_secret_fails() {
        let mut config = ServiceConfig::default();
        config.webhook.secret = Some(String::new());
        assert!(config.validate().is_err());
    }
}

// ============================================================================
// Conversions
// ============================================================================

mod conversion_tests {
    use super::*;

    #[test]
    fn test_webhook_config_follows_secret() {
        let mut config = ServiceConfig::default();
        assert!(config.webhook_config().secret.is_none());

        config.webhook.secret = Some("topsecret".to_string());
        let secret = config.webhook_config().secret.unwrap();
        assert_eq!(secret.expose(), b"topsecret");
    }

    #[test]
    fn test_subscribed_events_are_trimmed() {
        let mut config = ServiceConfig::default();
        config.webhook.events = vec![" push".to_string(), "release ".to_string()];

        assert_eq!(
            config.subscribed_events(),
            vec![EventKind::PUSH, EventKind::RELEASE]
        );
    }

    /// Verify that Debug output redacts the secret value.
    #[test]
    fn test_debug_redacts_secret() {
        let mut config = ServiceConfig::default();
        config.webhook.secret = Some("super-sensitive".to_string());

        let debug_str = format!("{:?}", config);
        assert!(
            !debug_str.contains("super-sensitive"),
            "debug output must not leak secret: {debug_str}"
        );
        assert!(debug_str.contains("REDACTED"));
    }

    /// Verify that serialised configuration never contains the secret.
    #[test]
    fn test_secret_is_not_serialized() {
        let mut config = ServiceConfig::default();
        config.webhook.secret = Some("super-sensitive".to_string());

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-sensitive"));
        assert!(!json.contains("secret"));
    }

    /// Verify that partial JSON fills the rest from defaults.
    #[test]
    fn test_partial_document_uses_defaults() {
        let config: ServiceConfig =
            serde_json::from_str(r#"{"server": {"port": 9000}}"#).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.webhook.events.len(), 8);
        assert_eq!(config.logging.level, "info");
    }
}

// ============================================================================
// Loading
// ============================================================================

mod loading_tests {
    use super::*;

    /// Removes the listed environment variables when dropped.
    struct EnvGuard(&'static [&'static str]);

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for key in self.0 {
                std::env::remove_var(key);
            }
        }
    }

    fn write_yaml(dir: &tempfile::TempDir, contents: &str) -> String {
        let path = dir.path().join("service.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    #[serial]
    fn test_load_without_sources_gives_defaults() {
        let config = ServiceConfig::load_from(&[], None).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.webhook.events.len(), 8);
    }

    #[test]
    #[serial]
    fn test_load_from_explicit_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(
            &dir,
            "server:\n  port: 9191\n  endpoint_path: /hooks/gitea\nwebhook:\n  secret: from-file\n  events:\n    - push\n    - release\nlogging:\n  json_format: true\n",
        );

        let config = ServiceConfig::load_from(&[], Some(&path)).unwrap();

        assert_eq!(config.server.port, 9191);
        assert_eq!(config.server.endpoint_path, "/hooks/gitea");
        assert_eq!(config.webhook.secret.as_deref(), Some("from-file"));
        assert_eq!(config.webhook.events, vec!["push", "release"]);
        assert!(config.logging.json_format);
    }

    #[test]
    #[serial]
    fn test_missing_optional_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent").to_string_lossy().into_owned();

        let config = ServiceConfig::load_from(&[missing.as_str()], None).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml").to_string_lossy().into_owned();

        let err = ServiceConfig::load_from(&[], Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)), "unexpected error: {err:?}");
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        let _guard = EnvGuard(&["GH__SERVER__PORT", "GH__WEBHOOK__EVENTS"]);
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(&dir, "server:\n  port: 9191\n");

        std::env::set_var("GH__SERVER__PORT", "9292");
        std::env::set_var("GH__WEBHOOK__EVENTS", "push,issues");

        let config = ServiceConfig::load_from(&[], Some(&path)).unwrap();

        assert_eq!(config.server.port, 9292);
        assert_eq!(config.webhook.events, vec!["push", "issues"]);
    }

    #[test]
    #[serial]
    fn test_wrongly_typed_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(&dir, "server:\n  port: not-a-number\n");

        let err = ServiceConfig::load_from(&[], Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)), "unexpected error: {err:?}");
    }

    #[test]
    #[serial]
    fn test_loaded_config_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(&dir, "server:\n  port: 0\n");

        let err = ServiceConfig::load_from(&[], Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }), "unexpected error: {err:?}");
    }
}
