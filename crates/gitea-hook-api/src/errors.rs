//! Error types for the HTTP service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use gitea_hook_core::{ErrorCategory, WebhookError};
use tracing::{error, warn};

/// Webhook handler errors with HTTP status code mapping
///
/// Every verifier failure is mapped to a status that tells Gitea whether the
/// delivery was understood:
///
/// - `202 Accepted`: the event kind is not subscribed; the delivery is ignored
/// - `400 Bad Request`: malformed request or payload
/// - `401 Unauthorized`: signature missing or wrong
/// - `405 Method Not Allowed`: anything other than `POST`
/// - `501 Not Implemented`: a Gitea event kind without a payload shape
/// - `500 Internal Server Error`: server-side failures
///
/// The response body is `{"error": <kind>, "message": <text>}`. Messages come
/// from the error's `Display` and never include the secret or the signature.
#[derive(Debug, thiserror::Error)]
pub enum WebhookHandlerError {
    /// The verifier rejected the delivery
    #[error(transparent)]
    Rejected(#[from] WebhookError),

    /// Unexpected internal server error
    #[error("Internal server error: {message}")]
    InternalError { message: String },
}

impl WebhookHandlerError {
    /// Status code returned for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Rejected(e) => match e {
                WebhookError::InvalidHttpMethod { .. } => StatusCode::METHOD_NOT_ALLOWED,
                WebhookError::MissingSignatureHeader | WebhookError::SignatureMismatch => {
                    StatusCode::UNAUTHORIZED
                }
                WebhookError::EventNotSubscribed { .. } => StatusCode::ACCEPTED,
                WebhookError::UnimplementedEvent { .. } => StatusCode::NOT_IMPLEMENTED,
                WebhookError::UnknownEvent { .. }
                | WebhookError::PayloadDecode(_)
                | WebhookError::EmptyBody
                | WebhookError::MissingEventHeader => StatusCode::BAD_REQUEST,
                WebhookError::BodyRead(_) | WebhookError::NoEventsToMatch => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable identifier placed in the `error` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Rejected(e) => e.kind(),
            Self::InternalError { .. } => "internal_error",
        }
    }
}

impl IntoResponse for WebhookHandlerError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match &self {
            Self::Rejected(e) if e.error_category() == ErrorCategory::Security => {
                warn!(kind = e.kind(), "Webhook authentication failed");
                e.to_string()
            }
            Self::Rejected(e) if status.is_server_error() => {
                error!(error = %e, "Webhook handling failed");
                e.to_string()
            }
            Self::Rejected(e) => e.to_string(),
            Self::InternalError { message } => {
                // Log detailed error server-side but return generic message to client
                error!(error = %message, "Internal server error occurred");
                "Internal server error occurred. Please try again later.".to_string()
            }
        };

        let body = serde_json::json!({
            "error": self.kind(),
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

/// Service-level errors
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Failed to bind to address {address}: {message}")]
    BindFailed { address: String, message: String },

    #[error("Server failed: {message}")]
    ServerFailed { message: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Configuration loading failed: {0}")]
    Load(#[from] ::config::ConfigError),
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
