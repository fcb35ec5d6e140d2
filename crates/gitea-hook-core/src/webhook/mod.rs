//! # Webhook Verification Module
//!
//! Verifies an incoming Gitea delivery and decodes it into a typed [`Payload`].
//!
//! A single [`Webhook`] is built once from a [`WebhookConfig`] and can be
//! shared freely; each call to [`Webhook::verify_and_decode`] runs the same
//! fixed sequence of checks and stops at the first failure:
//!
//! 1. the subscription set is non-empty
//! 2. the method is `POST`
//! 3. `X-Gitea-Event` is present
//! 4. the event kind is subscribed
//! 5. the body is readable and non-empty
//! 6. `X-Gitea-Signature` matches, when a secret is configured
//! 7. the event kind has a decoder
//! 8. the body decodes as that kind's payload
//!
//! The request body is drained on every path, including early rejections.

use http::{HeaderMap, Method, Request};
use std::fmt;
use std::io::Read;
use tracing::{debug, info, instrument, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::WebhookError;
use crate::event::EventKind;
use crate::payload::{self, Payload};

mod body;
pub mod signature;

use body::DrainingBody;

/// Header naming the event kind of a delivery.
pub const EVENT_HEADER: &str = "X-Gitea-Event";

/// Header carrying the hex HMAC-SHA256 of the body.
pub const SIGNATURE_HEADER: &str = "X-Gitea-Signature";

// ============================================================================
// Configuration
// ============================================================================

/// Shared secret used to authenticate deliveries.
///
/// The bytes are wiped when the value is dropped and never appear in `Debug`
/// output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WebhookSecret(Vec<u8>);

impl WebhookSecret {
    /// Create a secret from raw bytes.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    /// Access the secret bytes (only for immediate use).
    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookSecret")
            .field("length", &self.len())
            .field("value", &"[REDACTED]")
            .finish()
    }
}

impl From<&str> for WebhookSecret {
    fn from(value: &str) -> Self {
        Self::new(value.as_bytes())
    }
}

impl From<String> for WebhookSecret {
    fn from(value: String) -> Self {
        Self::new(value.into_bytes())
    }
}

impl From<Vec<u8>> for WebhookSecret {
    fn from(value: Vec<u8>) -> Self {
        Self::new(value)
    }
}

/// Construction options for [`Webhook`].
///
/// The default has no secret, which disables signature verification.
///
/// # Examples
///
/// ```rust
/// use gitea_hook_core::webhook::WebhookConfig;
///
/// let open = WebhookConfig::default();
/// assert!(open.secret.is_none());
///
/// let signed = WebhookConfig::with_secret("s3cret");
/// assert!(signed.secret.is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct WebhookConfig {
    pub secret: Option<WebhookSecret>,
}

impl WebhookConfig {
    /// Configuration that requires deliveries to be signed with `secret`.
    ///
    /// An empty secret leaves signature verification disabled.
    pub fn with_secret(secret: impl Into<WebhookSecret>) -> Self {
        let secret = secret.into();
        Self {
            secret: (!secret.is_empty()).then_some(secret),
        }
    }

    /// The secret deliveries must be signed with, if verification is enabled.
    fn signing_secret(&self) -> Option<&WebhookSecret> {
        self.secret.as_ref().filter(|secret| !secret.is_empty())
    }
}

// ============================================================================
// Verifier
// ============================================================================

/// Verifier and decoder for Gitea webhook deliveries.
///
/// Holds no mutable state, so one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Webhook {
    config: WebhookConfig,
}

impl Webhook {
    pub fn new(config: WebhookConfig) -> Self {
        Self { config }
    }

    /// Returns `true` if deliveries must carry a valid signature.
    pub fn requires_signature(&self) -> bool {
        self.config.signing_secret().is_some()
    }

    /// Verify `request` and decode its body.
    ///
    /// `events` is the caller's subscription set; deliveries for any other kind
    /// are rejected before the body is read.
    ///
    /// # Errors
    ///
    /// Returns the [`WebhookError`] of the first check that fails; see the
    /// module documentation for the order.
    #[instrument(skip(self, request, events), fields(
        method = %request.method(),
        subscribed = events.len(),
    ))]
    pub fn verify_and_decode<B: Read>(
        &self,
        request: Request<B>,
        events: &[EventKind],
    ) -> Result<Payload, WebhookError> {
        let (parts, body) = request.into_parts();
        let mut body = DrainingBody::new(body);

        let result = self.process(&parts.method, &parts.headers, &mut body, events);

        match &result {
            Ok(payload) => info!(
                event = %payload.event_kind(),
                repository = payload.repository().map(|r| r.full_name.as_str()).unwrap_or(""),
                "Webhook delivery verified and decoded"
            ),
            Err(e) if e.is_security_relevant() => warn!(
                error = %e,
                kind = e.kind(),
                "Rejected webhook delivery with invalid authentication"
            ),
            Err(e) => debug!(error = %e, kind = e.kind(), "Rejected webhook delivery"),
        }

        result
    }

    fn process<B: Read>(
        &self,
        method: &Method,
        headers: &HeaderMap,
        body: &mut DrainingBody<B>,
        events: &[EventKind],
    ) -> Result<Payload, WebhookError> {
        if events.is_empty() {
            return Err(WebhookError::NoEventsToMatch);
        }

        if *method != Method::POST {
            return Err(WebhookError::InvalidHttpMethod {
                method: method.to_string(),
            });
        }

        let event = header_text(headers, EVENT_HEADER)
            .map(EventKind::new)
            .ok_or(WebhookError::MissingEventHeader)?;

        if !events.contains(&event) {
            return Err(WebhookError::EventNotSubscribed { event });
        }

        let bytes = body.read_all().map_err(WebhookError::BodyRead)?;
        if bytes.is_empty() {
            return Err(WebhookError::EmptyBody);
        }

        if let Some(secret) = self.config.signing_secret() {
            let provided = header_text(headers, SIGNATURE_HEADER)
                .ok_or(WebhookError::MissingSignatureHeader)?;

            if !signature::verify_signature(secret.expose(), &bytes, provided) {
                return Err(WebhookError::SignatureMismatch);
            }
            debug!(event = %event, "Webhook signature validated");
        }

        payload::decode(&event, &bytes)
    }
}

/// First value of `name`, if present, non-empty and valid header text.
fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
