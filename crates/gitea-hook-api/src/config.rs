//! Configuration types for the HTTP service
//!
//! Every field has a default, so an absent file or an unconfigured
//! environment yields a runnable service that accepts unsigned deliveries for
//! all implemented event kinds.

use ::config::{Config, Environment, File, FileFormat};
use gitea_hook_core::{payload, EventKind, WebhookConfig};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ConfigError;

/// Environment variable naming an extra configuration file.
pub const CONFIG_FILE_ENV: &str = "GITEA_HOOK_CONFIG_FILE";

/// Prefix of environment overrides, e.g. `GH__SERVER__PORT=9090`.
pub const ENV_PREFIX: &str = "GH";

/// Configuration files consulted, lowest precedence first. Extensions are
/// resolved by the loader.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["/etc/gitea-hook/service", "config/service"];

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Webhook verification settings
    pub webhook: WebhookSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Path the webhook endpoint is mounted at
    pub endpoint_path: String,

    /// Maximum request size in bytes
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            endpoint_path: gitea_hook_core::SERVER_PATH.to_string(),
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Webhook verification configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSettings {
    /// Shared secret; when absent signatures are not checked
    #[serde(skip_serializing)]
    pub secret: Option<String>,

    /// Event kinds the service accepts
    pub events: Vec<String>,
}

impl Default for WebhookSettings {
    fn default() -> Self {
        Self {
            secret: None,
            events: payload::implemented_events()
                .map(|kind| kind.as_str().to_string())
                .collect(),
        }
    }
}

impl fmt::Debug for WebhookSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookSettings")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("events", &self.events)
            .finish()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Logging level
    pub level: String,

    /// Enable JSON structured logging
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the default files, the file named by
    /// [`CONFIG_FILE_ENV`] and `GH__` environment variables, in that order of
    /// increasing precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source is malformed, a value has the wrong
    /// type, or the merged configuration fails [`ServiceConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var(CONFIG_FILE_ENV)
            .ok()
            .filter(|path| !path.is_empty());
        Self::load_from(&DEFAULT_CONFIG_FILES, explicit.as_deref())
    }

    /// Load configuration from the given optional files plus a required
    /// `explicit` file, then apply environment overrides.
    pub fn load_from(
        optional_files: &[&str],
        explicit: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        for name in optional_files {
            builder = builder.add_source(
                File::with_name(name)
                    .required(false)
                    .format(FileFormat::Yaml),
            );
        }

        if let Some(path) = explicit {
            builder = builder.add_source(
                File::with_name(path)
                    .required(true)
                    .format(FileFormat::Yaml),
            );
            tracing::info!(path = %path, "Loading configuration from explicit path");
        }

        let config: ServiceConfig = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("webhook.events"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(invalid("server.port must not be 0"));
        }

        if !self.server.endpoint_path.starts_with('/') {
            return Err(invalid(format!(
                "server.endpoint_path must start with '/', got {:?}",
                self.server.endpoint_path
            )));
        }

        if self.server.max_body_size == 0 {
            return Err(invalid("server.max_body_size must be greater than 0"));
        }

        if self.webhook.events.is_empty() {
            return Err(invalid("webhook.events must list at least one event"));
        }

        if self.webhook.events.iter().any(|e| e.trim().is_empty()) {
            return Err(invalid("webhook.events must not contain blank entries"));
        }

        if matches!(&self.webhook.secret, Some(secret) if secret.is_empty()) {
            return Err(invalid(
                "webhook.secret must not be empty; omit it to disable signature checks",
            ));
        }

        Ok(())
    }

    /// Build the verifier configuration.
    pub fn webhook_config(&self) -> WebhookConfig {
        match &self.webhook.secret {
            Some(secret) => WebhookConfig::with_secret(secret.as_str()),
            None => WebhookConfig::default(),
        }
    }

    /// The subscription set handed to the verifier.
    pub fn subscribed_events(&self) -> Vec<EventKind> {
        self.webhook
            .events
            .iter()
            .map(|name| EventKind::new(name.trim()))
            .collect()
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        message: message.into(),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
