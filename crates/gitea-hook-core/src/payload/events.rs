//! Payload shapes for the event kinds that can be decoded.

use serde::{Deserialize, Serialize};

use super::null_as_default;
use super::types::{
    ChangesPayload, Issue, PayloadCommit, PullRequest, Release, Repository, ReviewPayload, User,
};

// ============================================================================
// Actions
// ============================================================================

/// Action carried by `issues` and `pull_request` deliveries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueAction {
    Opened,
    Closed,
    Reopened,
    Edited,
    Assigned,
    Unassigned,
    LabelUpdated,
    LabelCleared,
    Synchronized,
    Milestoned,
    Demilestoned,
    Reviewed,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Action carried by `release` deliveries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleaseAction {
    Published,
    Updated,
    Deleted,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Action carried by `repository` deliveries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepositoryAction {
    Created,
    Deleted,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Who performed a ref deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PusherType {
    User,
    #[default]
    #[serde(other)]
    Unknown,
}

// ============================================================================
// Payloads
// ============================================================================

/// A branch or tag was created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePayload {
    #[serde(deserialize_with = "null_as_default")]
    pub sha: String,
    #[serde(rename = "ref", deserialize_with = "null_as_default")]
    pub git_ref: String,
    /// `branch` or `tag`.
    #[serde(deserialize_with = "null_as_default")]
    pub ref_type: String,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
}

/// A branch or tag was deleted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeletePayload {
    #[serde(rename = "ref", deserialize_with = "null_as_default")]
    pub git_ref: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ref_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pusher_type: PusherType,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
}

/// A repository was forked. `forkee` is the original.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForkPayload {
    pub forkee: Option<Repository>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
}

/// Commits were pushed to a ref.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushPayload {
    #[serde(rename = "ref", deserialize_with = "null_as_default")]
    pub git_ref: String,
    #[serde(deserialize_with = "null_as_default")]
    pub before: String,
    #[serde(deserialize_with = "null_as_default")]
    pub after: String,
    #[serde(deserialize_with = "null_as_default")]
    pub compare_url: String,
    pub commits: Option<Vec<PayloadCommit>>,
    pub head_commit: Option<PayloadCommit>,
    pub repository: Option<Repository>,
    pub pusher: Option<User>,
    pub sender: Option<User>,
}

impl PushPayload {
    /// Branch name when the push targets `refs/heads/*`.
    pub fn branch(&self) -> Option<&str> {
        self.git_ref.strip_prefix("refs/heads/")
    }

    /// Tag name when the push targets `refs/tags/*`.
    pub fn tag(&self) -> Option<&str> {
        self.git_ref.strip_prefix("refs/tags/")
    }

    /// Number of commits in the delivery. A null list counts as zero.
    pub fn commit_count(&self) -> usize {
        self.commits.as_ref().map_or(0, Vec::len)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssuePayload {
    #[serde(deserialize_with = "null_as_default")]
    pub action: IssueAction,
    #[serde(deserialize_with = "null_as_default")]
    pub number: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<ChangesPayload>,
    pub issue: Option<Issue>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub action: IssueAction,
    #[serde(deserialize_with = "null_as_default")]
    pub number: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<ChangesPayload>,
    pub pull_request: Option<PullRequest>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
    pub review: Option<ReviewPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub action: RepositoryAction,
    pub repository: Option<Repository>,
    pub organization: Option<User>,
    pub sender: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleasePayload {
    #[serde(deserialize_with = "null_as_default")]
    pub action: ReleaseAction,
    pub release: Option<Release>,
    pub repository: Option<Repository>,
    pub sender: Option<User>,
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
