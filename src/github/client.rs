use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;

use crate::foundation::error::{VizError, VizResult};
use crate::github::api::{
    ApiCheckRunList, ApiCommit, ApiErrorBody, ApiFile, ApiPullRequest,
};
use crate::github::model::{ChangedFile, CheckRun, CommitRecord};
use crate::github::url::PrLocator;

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const DIFF_MEDIA_TYPE: &str = "application/vnd.github.v3.diff";
const API_VERSION: &str = "2022-11-28";
const PER_PAGE: u32 = 100;

/// Read-only access to the pull request data a visualization needs.
///
/// Every call is a single attempt: failures are returned to the caller and never retried.
pub trait PullRequestSource {
    /// PR metadata.
    fn pull_request(&self, pr: &PrLocator) -> VizResult<ApiPullRequest>;
    /// Commits on the PR, oldest first.
    fn commits(&self, pr: &PrLocator) -> VizResult<Vec<CommitRecord>>;
    /// Combined unified diff.
    fn diff(&self, pr: &PrLocator) -> VizResult<String>;
    /// Per-file change list.
    fn files(&self, pr: &PrLocator) -> VizResult<Vec<ChangedFile>>;
    /// Check runs reported for `head_sha`.
    fn check_runs(&self, pr: &PrLocator, head_sha: &str) -> VizResult<Vec<CheckRun>>;
}

/// Options for [`GitHubClient`].
#[derive(Clone, Debug)]
pub struct GitHubClientOpts {
    /// REST API root, without trailing slash.
    pub base_url: String,
    /// Personal access token. Anonymous requests are rate-limited and cannot see private repos.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for GitHubClientOpts {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_owned(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }
}

/// Thin blocking wrapper over the GitHub REST endpoints used for a snapshot.
pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(opts: GitHubClientOpts) -> VizResult<Self> {
        if opts.token.is_none() {
            tracing::warn!(
                "no GitHub token configured; requests may be rate-limited or fail for private repositories"
            );
        }
        let http = Client::builder()
            .user_agent(concat!("pr-visualizer/", env!("CARGO_PKG_VERSION")))
            .timeout(opts.timeout)
            .build()
            .map_err(|e| VizError::GitHub(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: opts.base_url.trim_end_matches('/').to_owned(),
            token: opts.token.filter(|t| !t.is_empty()),
        })
    }

    fn request(&self, path: &str, accept: &str) -> RequestBuilder {
        let mut req = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .header(ACCEPT, accept)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        req
    }

    fn send(&self, path: &str, req: RequestBuilder) -> VizResult<Response> {
        let resp = req
            .send()
            .map_err(|e| VizError::GitHub(format!("request to {path} failed: {e}")))?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .map(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| status.to_string());
        tracing::warn!(%status, path, message, "GitHub request failed");
        Err(VizError::from_github_status(status.as_u16(), message))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> VizResult<T> {
        let resp = self.send(path, self.request(path, JSON_MEDIA_TYPE))?;
        resp.json::<T>()
            .map_err(|e| VizError::GitHub(format!("unexpected response from {path}: {e}")))
    }

    fn pulls_path(pr: &PrLocator) -> String {
        format!("/repos/{}/{}/pulls/{}", pr.owner, pr.repo, pr.number)
    }
}

impl PullRequestSource for GitHubClient {
    fn pull_request(&self, pr: &PrLocator) -> VizResult<ApiPullRequest> {
        self.get_json(&Self::pulls_path(pr))
    }

    fn commits(&self, pr: &PrLocator) -> VizResult<Vec<CommitRecord>> {
        let path = format!("{}/commits?per_page={PER_PAGE}", Self::pulls_path(pr));
        let commits: Vec<ApiCommit> = self.get_json(&path)?;
        Ok(commits.into_iter().map(CommitRecord::from).collect())
    }

    fn diff(&self, pr: &PrLocator) -> VizResult<String> {
        let path = Self::pulls_path(pr);
        let resp = self.send(&path, self.request(&path, DIFF_MEDIA_TYPE))?;
        resp.text()
            .map_err(|e| VizError::GitHub(format!("failed to read diff body: {e}")))
    }

    fn files(&self, pr: &PrLocator) -> VizResult<Vec<ChangedFile>> {
        let path = format!("{}/files?per_page={PER_PAGE}", Self::pulls_path(pr));
        let files: Vec<ApiFile> = self.get_json(&path)?;
        Ok(files.into_iter().map(ChangedFile::from).collect())
    }

    fn check_runs(&self, pr: &PrLocator, head_sha: &str) -> VizResult<Vec<CheckRun>> {
        let path = format!(
            "/repos/{}/{}/commits/{}/check-runs?per_page={PER_PAGE}",
            pr.owner, pr.repo, head_sha
        );
        let list: ApiCheckRunList = self.get_json(&path)?;
        tracing::debug!(total = list.total_count, "fetched check runs");
        Ok(list.check_runs.into_iter().map(CheckRun::from).collect())
    }
}
