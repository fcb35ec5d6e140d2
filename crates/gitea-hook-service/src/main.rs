//! # Gitea Hook Service
//!
//! Binary entry point for the Gitea webhook service.
//!
//! This executable:
//! - Loads configuration from files and the environment
//! - Initializes logging
//! - Starts the HTTP server from gitea-hook-api
//!
//! Exit codes: 1 bind failure, 2 server failure, 3 configuration error.

use gitea_hook_api::{start_server, LoggingConfig, ServiceConfig, ServiceError};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // -------------------------------------------------------------------------
    // Load configuration
    //
    // Sources, later ones override earlier ones:
    //  1. /etc/gitea-hook/service.yaml
    //  2. ./config/service.yaml
    //  3. Path given by GITEA_HOOK_CONFIG_FILE
    //  4. Environment variables prefixed GH__, e.g. GH__SERVER__PORT=9090
    //
    // Logging is configured from the loaded settings, so a load failure is
    // reported through a default subscriber.
    // -------------------------------------------------------------------------
    let service_config = match ServiceConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(&LoggingConfig::default());
            error!(
                error = %e,
                "Service configuration could not be loaded; aborting. \
                 Fix the configuration and restart."
            );
            std::process::exit(3);
        }
    };

    init_tracing(&service_config.logging);

    info!(
        host = %service_config.server.host,
        port = service_config.server.port,
        endpoint = %service_config.server.endpoint_path,
        events = ?service_config.webhook.events,
        "Starting Gitea Hook Service"
    );

    if let Err(e) = start_server(service_config).await {
        error!(error = %e, "Server terminated with an error");
        std::process::exit(exit_code(&e));
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(&logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            logging
                .json_format
                .then(|| tracing_subscriber::fmt::layer().json()),
        )
        .with((!logging.json_format).then(tracing_subscriber::fmt::layer))
        .init();
}

/// Filter directive applying `level` to this workspace's crates.
fn default_filter(level: &str) -> String {
    format!(
        "gitea_hook_service={level},gitea_hook_api={level},gitea_hook_core={level},tower_http={level}"
    )
}

fn exit_code(error: &ServiceError) -> i32 {
    match error {
        ServiceError::BindFailed { .. } => 1,
        ServiceError::ServerFailed { .. } => 2,
        ServiceError::Configuration(_) => 3,
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
