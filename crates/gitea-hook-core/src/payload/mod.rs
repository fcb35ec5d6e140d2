//! Typed Gitea payloads and the registry that selects one per event kind.
//!
//! The registry is a static table with one entry per recognised
//! [`EventKind`]. Entries with a decoder produce a [`Payload`]; entries
//! without one are known Gitea events this crate does not decode yet. A kind
//! missing from the table is not a Gitea event at all.
//!
//! Supporting a new kind means adding a variant to [`Payload`], a decode
//! function, and filling in its registry entry.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::WebhookError;
use crate::event::EventKind;

pub mod events;
pub mod types;

pub use events::{
    CreatePayload, DeletePayload, ForkPayload, IssueAction, IssuePayload, PullRequestPayload,
    PushPayload, PusherType, ReleaseAction, ReleasePayload, RepositoryAction, RepositoryPayload,
};
pub use types::{
    Attachment, ChangesFromPayload, ChangesPayload, Commit, CommitAffectedFiles, CommitMeta,
    CommitUser, ExternalTracker, ExternalWiki, Identity, InternalTracker, Issue, Label,
    MergeStyle, Milestone, PayloadCommit, PayloadCommitVerification, PayloadUser, Permission,
    PrBranchInfo, PullRequest, PullRequestMeta, Release, RepoCommit, Repository,
    RepositoryMeta, ReviewPayload, StateType, User, Visibility,
};

/// Decode a field, mapping JSON `null` to the type's default.
///
/// Gitea emits `null` for unset scalars as often as it omits them.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Payload
// ============================================================================

/// A decoded delivery, one variant per implemented event kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Create(CreatePayload),
    Delete(DeletePayload),
    Fork(ForkPayload),
    Push(PushPayload),
    Issues(IssuePayload),
    PullRequest(PullRequestPayload),
    Repository(RepositoryPayload),
    Release(ReleasePayload),
}

impl Payload {
    /// The event kind this payload was decoded for.
    pub fn event_kind(&self) -> EventKind {
        match self {
            Self::Create(_) => EventKind::CREATE,
            Self::Delete(_) => EventKind::DELETE,
            Self::Fork(_) => EventKind::FORK,
            Self::Push(_) => EventKind::PUSH,
            Self::Issues(_) => EventKind::ISSUES,
            Self::PullRequest(_) => EventKind::PULL_REQUEST,
            Self::Repository(_) => EventKind::REPOSITORY,
            Self::Release(_) => EventKind::RELEASE,
        }
    }

    /// Repository the event happened in, when the sender included it.
    pub fn repository(&self) -> Option<&Repository> {
        match self {
            Self::Create(p) => p.repository.as_ref(),
            Self::Delete(p) => p.repository.as_ref(),
            Self::Fork(p) => p.repository.as_ref(),
            Self::Push(p) => p.repository.as_ref(),
            Self::Issues(p) => p.repository.as_ref(),
            Self::PullRequest(p) => p.repository.as_ref(),
            Self::Repository(p) => p.repository.as_ref(),
            Self::Release(p) => p.repository.as_ref(),
        }
    }

    /// Account that triggered the event.
    pub fn sender(&self) -> Option<&User> {
        match self {
            Self::Create(p) => p.sender.as_ref(),
            Self::Delete(p) => p.sender.as_ref(),
            Self::Fork(p) => p.sender.as_ref(),
            Self::Push(p) => p.sender.as_ref(),
            Self::Issues(p) => p.sender.as_ref(),
            Self::PullRequest(p) => p.sender.as_ref(),
            Self::Repository(p) => p.sender.as_ref(),
            Self::Release(p) => p.sender.as_ref(),
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Decodes a raw JSON body into a [`Payload`].
pub type DecodeFn = fn(&[u8]) -> Result<Payload, serde_json::Error>;

/// Outcome of looking an event kind up in the registry.
#[derive(Debug, Clone, Copy)]
pub enum Lookup {
    /// The kind can be decoded.
    Decoder(DecodeFn),
    /// Gitea sends this kind but no payload shape exists for it.
    Unimplemented,
    /// Gitea does not send this kind.
    Unknown,
}

static REGISTRY: [(EventKind, Option<DecodeFn>); 20] = [
    (EventKind::CREATE, Some(decode_create)),
    (EventKind::DELETE, Some(decode_delete)),
    (EventKind::FORK, Some(decode_fork)),
    (EventKind::PUSH, Some(decode_push)),
    (EventKind::ISSUES, Some(decode_issues)),
    (EventKind::ISSUE_ASSIGN, None),
    (EventKind::ISSUE_LABEL, None),
    (EventKind::ISSUE_MILESTONE, None),
    (EventKind::ISSUE_COMMENT, None),
    (EventKind::PULL_REQUEST, Some(decode_pull_request)),
    (EventKind::PULL_REQUEST_ASSIGN, None),
    (EventKind::PULL_REQUEST_LABEL, None),
    (EventKind::PULL_REQUEST_MILESTONE, None),
    (EventKind::PULL_REQUEST_COMMENT, None),
    (EventKind::PULL_REQUEST_REVIEW_APPROVED, None),
    (EventKind::PULL_REQUEST_REVIEW_REJECTED, None),
    (EventKind::PULL_REQUEST_REVIEW_COMMENT, None),
    (EventKind::PULL_REQUEST_SYNC, None),
    (EventKind::REPOSITORY, Some(decode_repository)),
    (EventKind::RELEASE, Some(decode_release)),
];

/// Find the decoder registered for `event`.
pub fn lookup(event: &EventKind) -> Lookup {
    match REGISTRY.iter().find(|(kind, _)| kind == event) {
        Some((_, Some(decoder))) => Lookup::Decoder(*decoder),
        Some((_, None)) => Lookup::Unimplemented,
        None => Lookup::Unknown,
    }
}

/// Event kinds that have a decoder, in registry order.
pub fn implemented_events() -> impl Iterator<Item = &'static EventKind> {
    REGISTRY
        .iter()
        .filter(|(_, decoder)| decoder.is_some())
        .map(|(kind, _)| kind)
}

/// Decode `body` as the payload shape registered for `event`.
///
/// # Errors
///
/// - [`WebhookError::UnimplementedEvent`] if the kind has no decoder
/// - [`WebhookError::UnknownEvent`] if the kind is not in the registry
/// - [`WebhookError::PayloadDecode`] if the body does not fit the shape
pub fn decode(event: &EventKind, body: &[u8]) -> Result<Payload, WebhookError> {
    match lookup(event) {
        Lookup::Decoder(decoder) => Ok(decoder(body)?),
        Lookup::Unimplemented => Err(WebhookError::UnimplementedEvent {
            event: event.clone(),
        }),
        Lookup::Unknown => Err(WebhookError::UnknownEvent {
            event: event.clone(),
        }),
    }
}

fn decode_as<T: DeserializeOwned>(
    body: &[u8],
    wrap: fn(T) -> Payload,
) -> Result<Payload, serde_json::Error> {
    serde_json::from_slice(body).map(wrap)
}

fn decode_create(body: &[u8]) -> Result<Payload, serde_json::Error> {
    decode_as(body, Payload::Create)
}

fn decode_delete(body: &[u8]) -> Result<Payload, serde_json::Error> {
    decode_as(body, Payload::Delete)
}

fn decode_fork(body: &[u8]) -> Result<Payload, serde_json::Error> {
    decode_as(body, Payload::Fork)
}

fn decode_push(body: &[u8]) -> Result<Payload, serde_json::Error> {
    decode_as(body, Payload::Push)
}

fn decode_issues(body: &[u8]) -> Result<Payload, serde_json::Error> {
    decode_as(body, Payload::Issues)
}

fn decode_pull_request(body: &[u8]) -> Result<Payload, serde_json::Error> {
    decode_as(body, Payload::PullRequest)
}

fn decode_repository(body: &[u8]) -> Result<Payload, serde_json::Error> {
    decode_as(body, Payload::Repository)
}

fn decode_release(body: &[u8]) -> Result<Payload, serde_json::Error> {
    decode_as(body, Payload::Release)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
