//! Records shared between the Gitea payload shapes.
//!
//! Field names follow Gitea's snake_case JSON. Every record tolerates missing
//! fields (they take their default) and ignores fields it does not know.

use serde::{Deserialize, Serialize};

use super::null_as_default;
use crate::timestamp::TolerantTime;

// ============================================================================
// Closed string sets
// ============================================================================

/// Visibility of a user or organisation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Limited,
    Private,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Open/closed state of an issue, pull request or milestone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateType {
    Open,
    Closed,
    All,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Default merge style configured on a repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStyle {
    Merge,
    Rebase,
    RebaseMerge,
    Squash,
    FastForwardOnly,
    ManuallyMerged,
    RebaseUpdateOnly,
    #[default]
    #[serde(other)]
    Unknown,
}

// ============================================================================
// Users
// ============================================================================

/// Name and email pair used in git metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
}

/// A Gitea account (user or organisation).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    /// Username.
    #[serde(deserialize_with = "null_as_default")]
    pub login: String,
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub avatar_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_admin: bool,
    pub last_login: TolerantTime,
    pub created: TolerantTime,
    #[serde(deserialize_with = "null_as_default")]
    pub restricted: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub prohibit_login: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub visibility: Visibility,
    #[serde(deserialize_with = "null_as_default")]
    pub followers_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub following_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub starred_repos_count: i64,
}

/// Author or committer of a pushed commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadUser {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
}

// ============================================================================
// Commits
// ============================================================================

/// Git identity plus the time it acted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitUser {
    #[serde(flatten)]
    pub identity: Identity,
    pub date: TolerantTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitMeta {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sha: String,
    pub created: TolerantTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitAffectedFiles {
    #[serde(deserialize_with = "null_as_default")]
    pub filename: String,
}

/// Commit as returned by the repository API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commit {
    #[serde(flatten)]
    pub meta: CommitMeta,
    #[serde(deserialize_with = "null_as_default")]
    pub html_url: String,
    pub commit: Option<RepoCommit>,
    pub author: Option<User>,
    pub committer: Option<User>,
    pub parents: Option<Vec<CommitMeta>>,
    pub files: Option<Vec<CommitAffectedFiles>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoCommit {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    pub author: Option<CommitUser>,
    pub committer: Option<CommitUser>,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    pub tree: Option<CommitMeta>,
}

/// A commit as carried in a push delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadCommit {
    /// SHA1 of the commit.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    pub author: Option<PayloadUser>,
    pub committer: Option<PayloadUser>,
    pub verification: Option<PayloadCommitVerification>,
    pub timestamp: TolerantTime,
    pub added: Option<Vec<String>>,
    pub removed: Option<Vec<String>>,
    pub modified: Option<Vec<String>>,
}

/// GPG verification result for a pushed commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadCommitVerification {
    #[serde(deserialize_with = "null_as_default")]
    pub verified: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub reason: String,
    #[serde(deserialize_with = "null_as_default")]
    pub signature: String,
    pub signer: Option<PayloadUser>,
    #[serde(deserialize_with = "null_as_default")]
    pub payload: String,
}

// ============================================================================
// Repositories
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permission {
    #[serde(deserialize_with = "null_as_default")]
    pub admin: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub push: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub pull: bool,
}

/// Settings of the built-in issue tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InternalTracker {
    #[serde(deserialize_with = "null_as_default")]
    pub enable_time_tracker: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub allow_only_contributors_to_track_time: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub enable_issue_dependencies: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalTracker {
    #[serde(deserialize_with = "null_as_default")]
    pub external_tracker_url: String,
    /// URL template with `{user}`, `{repo}` and `{index}` placeholders.
    #[serde(deserialize_with = "null_as_default")]
    pub external_tracker_format: String,
    /// Either `numeric` or `alphanumeric`.
    #[serde(deserialize_with = "null_as_default")]
    pub external_tracker_style: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExternalWiki {
    #[serde(deserialize_with = "null_as_default")]
    pub external_wiki_url: String,
}

/// A Gitea repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    pub owner: Option<User>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub empty: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub private: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub fork: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub template: bool,
    /// Source repository when this one is a fork.
    pub parent: Option<Box<Repository>>,
    #[serde(deserialize_with = "null_as_default")]
    pub mirror: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub html_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ssh_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub clone_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub original_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(deserialize_with = "null_as_default")]
    pub stars_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub forks_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub watchers_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub open_issues_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub open_pr_counter: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub release_counter: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub default_branch: String,
    #[serde(deserialize_with = "null_as_default")]
    pub archived: bool,
    pub created_at: TolerantTime,
    pub updated_at: TolerantTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permission>,
    #[serde(deserialize_with = "null_as_default")]
    pub has_issues: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_tracker: Option<InternalTracker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_tracker: Option<ExternalTracker>,
    #[serde(deserialize_with = "null_as_default")]
    pub has_wiki: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_wiki: Option<ExternalWiki>,
    #[serde(deserialize_with = "null_as_default")]
    pub has_pull_requests: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub has_projects: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub ignore_whitespace_conflicts: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub allow_merge_commits: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub allow_rebase: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub allow_rebase_explicit: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub allow_squash_merge: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub avatar_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub internal: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub mirror_interval: String,
    #[serde(deserialize_with = "null_as_default")]
    pub default_merge_style: MergeStyle,
}

/// Abbreviated repository reference embedded in an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryMeta {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub owner: String,
    #[serde(deserialize_with = "null_as_default")]
    pub full_name: String,
}

// ============================================================================
// Issues and pull requests
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Hex colour without the leading `#`, e.g. `00aabb`.
    #[serde(deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Milestone {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: StateType,
    #[serde(deserialize_with = "null_as_default")]
    pub open_issues: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub closed_issues: i64,
    pub created_at: TolerantTime,
    pub updated_at: TolerantTime,
    pub closed_at: TolerantTime,
    pub due_on: TolerantTime,
}

/// Merge status attached to issues that are pull requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestMeta {
    #[serde(deserialize_with = "null_as_default")]
    pub merged: bool,
    pub merged_at: TolerantTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issue {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub html_url: String,
    /// Per-repository issue index.
    #[serde(deserialize_with = "null_as_default")]
    pub number: i64,
    pub user: Option<User>,
    #[serde(deserialize_with = "null_as_default")]
    pub original_author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub original_author_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(rename = "ref", deserialize_with = "null_as_default")]
    pub git_ref: String,
    pub labels: Option<Vec<Label>>,
    pub milestone: Option<Milestone>,
    pub assignees: Option<Vec<User>>,
    #[serde(deserialize_with = "null_as_default")]
    pub state: StateType,
    #[serde(deserialize_with = "null_as_default")]
    pub is_locked: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub comments: i64,
    pub created_at: TolerantTime,
    pub updated_at: TolerantTime,
    pub closed_at: TolerantTime,
    pub due_date: TolerantTime,
    pub pull_request: Option<PullRequestMeta>,
    pub repository: Option<RepositoryMeta>,
}

/// One side (base or head) of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrBranchInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(rename = "ref", deserialize_with = "null_as_default")]
    pub git_ref: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sha: String,
    #[serde(deserialize_with = "null_as_default")]
    pub repo_id: i64,
    pub repo: Option<Repository>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub number: i64,
    pub user: Option<User>,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
    pub labels: Option<Vec<Label>>,
    pub milestone: Option<Milestone>,
    pub assignee: Option<User>,
    pub assignees: Option<Vec<User>>,
    #[serde(deserialize_with = "null_as_default")]
    pub state: StateType,
    #[serde(deserialize_with = "null_as_default")]
    pub is_locked: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub comments: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub html_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub diff_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub patch_url: String,

    #[serde(deserialize_with = "null_as_default")]
    pub mergeable: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub merged: bool,
    pub merged_at: TolerantTime,
    pub merge_commit_sha: Option<String>,
    pub merged_by: Option<User>,

    pub base: Option<PrBranchInfo>,
    pub head: Option<PrBranchInfo>,
    #[serde(deserialize_with = "null_as_default")]
    pub merge_base: String,

    pub due_date: TolerantTime,
    pub created_at: TolerantTime,
    pub updated_at: TolerantTime,
    pub closed_at: TolerantTime,
}

/// Previous value of an edited field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangesFromPayload {
    #[serde(deserialize_with = "null_as_default")]
    pub from: String,
}

/// Fields changed by an `edited` action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangesPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<ChangesFromPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ChangesFromPayload>,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<ChangesFromPayload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewPayload {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub review_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,
}

// ============================================================================
// Releases
// ============================================================================

/// A file attached to a release.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub download_count: i64,
    pub created_at: TolerantTime,
    #[serde(deserialize_with = "null_as_default")]
    pub uuid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub browser_download_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Release {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub tag_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub target_commitish: String,
    /// Release title.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Release notes.
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub html_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tarball_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub zipball_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub draft: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub prerelease: bool,
    pub created_at: TolerantTime,
    pub published_at: TolerantTime,
    pub author: Option<User>,
    pub assets: Option<Vec<Attachment>>,
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
