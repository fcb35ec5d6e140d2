//! Error types for webhook verification and decoding.
//!
//! Every step of the verification pipeline has its own variant so callers can
//! tell a misconfigured caller apart from a forged delivery or a payload the
//! sender got wrong.

use thiserror::Error;

use crate::event::EventKind;

/// Broad classification of a [`WebhookError`] for logging and status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The caller used the verifier incorrectly (no events, wrong method).
    CallerMisuse,
    /// The request does not follow the Gitea webhook protocol.
    Protocol,
    /// Authentication of the delivery failed.
    Security,
    /// The body could not be read or decoded.
    Data,
    /// The event kind is filtered out or cannot be decoded.
    Dispatch,
}

/// Failure of a single `verify_and_decode` call.
///
/// All variants are terminal for the request. None of them is retried by the
/// verifier.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The caller passed an empty subscription set.
    #[error("no event specified to parse")]
    NoEventsToMatch,

    /// The request was not a POST.
    #[error("invalid HTTP method: {method}")]
    InvalidHttpMethod { method: String },

    /// The `X-Gitea-Event` header is absent or empty.
    #[error("missing X-Gitea-Event header")]
    MissingEventHeader,

    /// The delivered event kind is not in the caller's subscription set.
    #[error("event {event} is not subscribed")]
    EventNotSubscribed { event: EventKind },

    /// The request body was empty.
    #[error("request body is empty")]
    EmptyBody,

    /// Reading the request body failed.
    #[error("failed to read request body: {0}")]
    BodyRead(#[source] std::io::Error),

    /// A secret is configured but the `X-Gitea-Signature` header is absent.
    #[error("missing X-Gitea-Signature header")]
    MissingSignatureHeader,

    /// The `X-Gitea-Signature` header does not match the body.
    #[error("X-Gitea-Signature is invalid")]
    SignatureMismatch,

    /// The event kind is a known Gitea event without a payload decoder.
    #[error("event {event} is not implemented")]
    UnimplementedEvent { event: EventKind },

    /// The event kind is not a Gitea event at all.
    #[error("unknown event {event}")]
    UnknownEvent { event: EventKind },

    /// The body is not valid JSON for the selected payload shape.
    #[error("error parsing payload: {0}")]
    PayloadDecode(#[from] serde_json::Error),
}

impl WebhookError {
    /// Get error category for monitoring and status mapping
    pub fn error_category(&self) -> ErrorCategory {
        match self {
            Self::NoEventsToMatch => ErrorCategory::CallerMisuse,
            Self::InvalidHttpMethod { .. } => ErrorCategory::CallerMisuse,
            Self::MissingEventHeader => ErrorCategory::Protocol,
            Self::EventNotSubscribed { .. } => ErrorCategory::Dispatch,
            Self::EmptyBody => ErrorCategory::Data,
            Self::BodyRead(_) => ErrorCategory::Data,
            Self::MissingSignatureHeader => ErrorCategory::Security,
            Self::SignatureMismatch => ErrorCategory::Security,
            Self::UnimplementedEvent { .. } => ErrorCategory::Dispatch,
            Self::UnknownEvent { .. } => ErrorCategory::Dispatch,
            Self::PayloadDecode(_) => ErrorCategory::Data,
        }
    }

    /// Returns `true` for failures that may indicate a forged or misrouted delivery.
    pub fn is_security_relevant(&self) -> bool {
        self.error_category() == ErrorCategory::Security
    }

    /// Returns `true` when the body was empty or could not be read.
    pub fn is_body_error(&self) -> bool {
        matches!(self, Self::EmptyBody | Self::BodyRead(_))
    }

    /// Short, stable identifier for the failure, suitable for metrics labels
    /// and machine-readable error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoEventsToMatch => "no_events_to_match",
            Self::InvalidHttpMethod { .. } => "invalid_http_method",
            Self::MissingEventHeader => "missing_event_header",
            Self::EventNotSubscribed { .. } => "event_not_subscribed",
            Self::EmptyBody => "empty_body",
            Self::BodyRead(_) => "body_read",
            Self::MissingSignatureHeader => "missing_signature_header",
            Self::SignatureMismatch => "signature_mismatch",
            Self::UnimplementedEvent { .. } => "unimplemented_event",
            Self::UnknownEvent { .. } => "unknown_event",
            Self::PayloadDecode(_) => "payload_decode",
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
