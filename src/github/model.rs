//! Pull request snapshot: the immutable input of one visualization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a pull request.
///
/// `Merged` never comes from GitHub directly; see [`PrState::derive`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    Open,
    Closed,
    Merged,
}

impl PrState {
    /// Derive the presented state from GitHub's raw `state` and `merged_at`.
    ///
    /// A closed PR with a merge timestamp is presented as merged.
    pub fn derive(raw: &str, merged_at: Option<&DateTime<Utc>>) -> Self {
        match raw {
            "open" => Self::Open,
            "merged" => Self::Merged,
            _ if merged_at.is_some() => Self::Merged,
            _ => Self::Closed,
        }
    }
}

/// A GitHub account as shown in the video.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub login: String,
    pub avatar_url: Option<String>,
}

/// One side of the PR: branch name and tip commit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    pub name: String,
    pub sha: String,
}

/// Aggregate counters reported by GitHub for the PR.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrStats {
    pub commits: u64,
    pub comments: u64,
    pub review_comments: u64,
    pub additions: u64,
    pub deletions: u64,
    pub changed_files: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    pub message: String,
    pub author_name: Option<String>,
    pub author_login: Option<String>,
    pub avatar_url: Option<String>,
    pub authored_at: Option<DateTime<Utc>>,
}

impl CommitRecord {
    /// First line of the commit message.
    pub fn headline(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Display name: commit author name, then account login, then a fixed fallback.
    pub fn display_author(&self) -> &str {
        self.author_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.author_login.as_deref())
            .unwrap_or("Unknown User")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Removed,
    Modified,
    Renamed,
    Copied,
    Changed,
    Unchanged,
}

impl FileStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Modified => "modified",
            Self::Renamed => "renamed",
            Self::Copied => "copied",
            Self::Changed => "changed",
            Self::Unchanged => "unchanged",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
    pub status: FileStatus,
    pub additions: u64,
    pub deletions: u64,
    pub patch: Option<String>,
    pub previous_filename: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Queued,
    InProgress,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    Success,
    Failure,
    Neutral,
    Cancelled,
    Skipped,
    TimedOut,
    ActionRequired,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRun {
    pub id: u64,
    pub name: String,
    pub status: CheckStatus,
    pub conclusion: Option<CheckConclusion>,
}

/// Everything fetched for one pull request.
///
/// Owned by the request that fetched it and never mutated afterwards; a new fetch produces a new
/// snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PullRequestSnapshot {
    pub number: u64,
    pub url: String,
    pub title: String,
    pub author: Option<UserRef>,
    pub state: PrState,
    pub merged_at: Option<DateTime<Utc>>,
    pub merged_by: Option<UserRef>,
    pub head: BranchRef,
    pub base: BranchRef,
    /// `owner/repo` of the base repository when GitHub reports it.
    pub repo_full_name: Option<String>,
    pub stats: PrStats,
    pub body: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub commits: Vec<CommitRecord>,
    pub files: Vec<ChangedFile>,
    /// Combined unified diff of the whole PR.
    pub diff: String,
    pub check_runs: Vec<CheckRun>,
    pub insight: Option<String>,
}

impl PullRequestSnapshot {
    /// `true` when the PR is presented as merged and GitHub recorded when.
    pub fn is_merged(&self) -> bool {
        self.state == PrState::Merged && self.merged_at.is_some()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/github/model.rs"]
mod tests;
