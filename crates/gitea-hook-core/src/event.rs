//! Gitea event kinds as carried in the `X-Gitea-Event` header.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Identifier naming the category of repository activity a delivery represents.
///
/// The value is an opaque string compared by exact, case-sensitive equality.
/// The kinds Gitea is known to send are available as associated constants;
/// any other string can be wrapped with [`EventKind::new`] and is reported as
/// unknown by the dispatcher.
///
/// # Examples
///
/// ```rust
/// use gitea_hook_core::EventKind;
///
/// let kind = EventKind::new("push");
/// assert_eq!(kind, EventKind::PUSH);
/// assert!(kind.is_recognized());
/// assert!(!EventKind::new("wiki").is_recognized());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventKind(Cow<'static, str>);

impl EventKind {
    pub const CREATE: Self = Self::from_static("create");
    pub const DELETE: Self = Self::from_static("delete");
    pub const FORK: Self = Self::from_static("fork");
    pub const PUSH: Self = Self::from_static("push");
    pub const ISSUES: Self = Self::from_static("issues");
    pub const ISSUE_ASSIGN: Self = Self::from_static("issue_assign");
    pub const ISSUE_LABEL: Self = Self::from_static("issue_label");
    pub const ISSUE_MILESTONE: Self = Self::from_static("issue_milestone");
    pub const ISSUE_COMMENT: Self = Self::from_static("issue_comment");
    pub const PULL_REQUEST: Self = Self::from_static("pull_request");
    pub const PULL_REQUEST_ASSIGN: Self = Self::from_static("pull_request_assign");
    pub const PULL_REQUEST_LABEL: Self = Self::from_static("pull_request_label");
    pub const PULL_REQUEST_MILESTONE: Self = Self::from_static("pull_request_milestone");
    pub const PULL_REQUEST_COMMENT: Self = Self::from_static("pull_request_comment");
    pub const PULL_REQUEST_REVIEW_APPROVED: Self =
        Self::from_static("pull_request_review_approved");
    pub const PULL_REQUEST_REVIEW_REJECTED: Self =
        Self::from_static("pull_request_review_rejected");
    pub const PULL_REQUEST_REVIEW_COMMENT: Self = Self::from_static("pull_request_review_comment");
    pub const PULL_REQUEST_SYNC: Self = Self::from_static("pull_request_sync");
    pub const REPOSITORY: Self = Self::from_static("repository");
    pub const RELEASE: Self = Self::from_static("release");

    /// Every event kind Gitea documents for webhooks, implemented or not.
    pub const ALL: [Self; 20] = [
        Self::CREATE,
        Self::DELETE,
        Self::FORK,
        Self::PUSH,
        Self::ISSUES,
        Self::ISSUE_ASSIGN,
        Self::ISSUE_LABEL,
        Self::ISSUE_MILESTONE,
        Self::ISSUE_COMMENT,
        Self::PULL_REQUEST,
        Self::PULL_REQUEST_ASSIGN,
        Self::PULL_REQUEST_LABEL,
        Self::PULL_REQUEST_MILESTONE,
        Self::PULL_REQUEST_COMMENT,
        Self::PULL_REQUEST_REVIEW_APPROVED,
        Self::PULL_REQUEST_REVIEW_REJECTED,
        Self::PULL_REQUEST_REVIEW_COMMENT,
        Self::PULL_REQUEST_SYNC,
        Self::REPOSITORY,
        Self::RELEASE,
    ];

    const fn from_static(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }

    /// Wrap an arbitrary event name.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Cow::Owned(value.into()))
    }

    /// Get string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if Gitea is known to send this kind.
    pub fn is_recognized(&self) -> bool {
        Self::ALL.iter().any(|known| known == self)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventKind {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EventKind {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl PartialEq<str> for EventKind {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for EventKind {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl AsRef<str> for EventKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
