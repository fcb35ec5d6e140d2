//! # Gitea Hook Core
//!
//! Verification and typed decoding of Gitea webhook deliveries.
//!
//! A delivery is checked against the caller's subscription set and, when a
//! shared secret is configured, against its `X-Gitea-Signature`. The body is
//! then decoded into the [`Payload`] variant for its event kind.
//!
//! ## Usage
//!
//! ```rust
//! use gitea_hook_core::{EventKind, Payload, Webhook, WebhookConfig};
//! use gitea_hook_core::webhook::signature::compute_signature;
//! use std::io::Cursor;
//!
//! let body = br#"{"ref": "refs/heads/main", "commits": [], "repository": {"name": "demo"}}"#;
//! let signature = compute_signature(b"s3cret", body).unwrap();
//!
//! let request = http::Request::builder()
//!     .method("POST")
//!     .header("X-Gitea-Event", "push")
//!     .header("X-Gitea-Signature", signature)
//!     .body(Cursor::new(body.to_vec()))
//!     .unwrap();
//!
//! let hook = Webhook::new(WebhookConfig::with_secret("s3cret"));
//! match hook.verify_and_decode(request, &[EventKind::PUSH]).unwrap() {
//!     Payload::Push(push) => assert_eq!(push.branch(), Some("main")),
//!     _ => unreachable!(),
//! }
//! ```

/// Conventional path a Gitea webhook receiver is mounted at.
pub const SERVER_PATH: &str = "/gitea/webhooks";

pub mod error;
pub mod event;
pub mod payload;
pub mod timestamp;
pub mod webhook;

pub use error::{ErrorCategory, WebhookError};
pub use event::EventKind;
pub use payload::Payload;
pub use timestamp::{TimestampError, TolerantTime};
pub use webhook::{Webhook, WebhookConfig, WebhookSecret};
