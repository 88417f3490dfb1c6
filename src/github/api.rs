//! Wire shapes of the GitHub REST responses we read, and their conversion into the snapshot
//! model. Only the fields the video uses are declared; everything else is ignored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::github::model::{
    BranchRef, ChangedFile, CheckConclusion, CheckRun, CheckStatus, CommitRecord, FileStatus,
    PrState, PrStats, UserRef,
};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl From<ApiUser> for UserRef {
    fn from(u: ApiUser) -> Self {
        Self {
            login: u.login,
            avatar_url: u.avatar_url.filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiRepo {
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiBranch {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub sha: String,
    #[serde(default)]
    pub repo: Option<ApiRepo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPullRequest {
    pub number: u64,
    pub html_url: String,
    pub title: String,
    #[serde(default)]
    pub user: Option<ApiUser>,
    #[serde(default)]
    pub body: Option<String>,
    pub state: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub merged_by: Option<ApiUser>,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub review_comments: u64,
    #[serde(default)]
    pub commits: u64,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub changed_files: u64,
    pub head: ApiBranch,
    pub base: ApiBranch,
}

impl ApiPullRequest {
    pub fn derived_state(&self) -> PrState {
        PrState::derive(&self.state, self.merged_at.as_ref())
    }

    pub fn stats(&self) -> PrStats {
        PrStats {
            commits: self.commits,
            comments: self.comments,
            review_comments: self.review_comments,
            additions: self.additions,
            deletions: self.deletions,
            changed_files: self.changed_files,
        }
    }

    pub fn head_ref(&self) -> BranchRef {
        BranchRef {
            name: self.head.ref_name.clone(),
            sha: self.head.sha.clone(),
        }
    }

    pub fn base_ref(&self) -> BranchRef {
        BranchRef {
            name: self.base.ref_name.clone(),
            sha: self.base.sha.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiGitAuthor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCommitDetail {
    pub message: String,
    #[serde(default)]
    pub author: Option<ApiGitAuthor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCommit {
    pub sha: String,
    pub commit: ApiCommitDetail,
    #[serde(default)]
    pub author: Option<ApiUser>,
}

impl From<ApiCommit> for CommitRecord {
    fn from(c: ApiCommit) -> Self {
        let (author_name, authored_at) = match c.commit.author {
            Some(a) => (a.name, a.date),
            None => (None, None),
        };
        let (author_login, avatar_url) = match c.author {
            Some(u) => (Some(u.login), u.avatar_url.filter(|s| !s.is_empty())),
            None => (None, None),
        };
        Self {
            sha: c.sha,
            message: c.commit.message,
            author_name,
            author_login,
            avatar_url,
            authored_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiFile {
    pub filename: String,
    pub status: FileStatus,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub patch: Option<String>,
    #[serde(default)]
    pub previous_filename: Option<String>,
}

impl From<ApiFile> for ChangedFile {
    fn from(f: ApiFile) -> Self {
        Self {
            filename: f.filename,
            status: f.status,
            additions: f.additions,
            deletions: f.deletions,
            patch: f.patch.filter(|p| !p.is_empty()),
            previous_filename: f.previous_filename,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCheckRun {
    pub id: u64,
    pub name: String,
    pub status: CheckStatus,
    #[serde(default)]
    pub conclusion: Option<CheckConclusion>,
}

impl From<ApiCheckRun> for CheckRun {
    fn from(r: ApiCheckRun) -> Self {
        Self {
            id: r.id,
            name: r.name,
            status: r.status,
            conclusion: r.conclusion,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCheckRunList {
    #[serde(default)]
    pub total_count: u64,
    pub check_runs: Vec<ApiCheckRun>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
#[path = "../../tests/unit/github/api.rs"]
mod tests;
