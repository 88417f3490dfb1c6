use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::error::{VizError, VizResult};

static PR_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:https?://)?(?:www\.)?github\.com/([^/\s?#]+)/([^/\s?#]+)/pull/(\d+)(?:[/?#].*)?$")
        .unwrap_or_else(|e| panic!("PR url pattern is invalid: {e}"))
});

/// Owner, repository and number identifying one pull request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrLocator {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl PrLocator {
    /// `owner/repo`.
    pub fn repo_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Canonical web URL of the pull request.
    pub fn html_url(&self) -> String {
        format!(
            "https://github.com/{}/{}/pull/{}",
            self.owner, self.repo, self.number
        )
    }
}

/// Parse `https://github.com/{owner}/{repo}/pull/{number}`.
///
/// Trailing path segments (`/files`, `/commits`), queries and fragments are accepted. Anything
/// else fails with [`VizError::InvalidPrUrl`] before a request is made.
pub fn parse_pr_url(input: &str) -> VizResult<PrLocator> {
    let caps = PR_URL
        .captures(input.trim())
        .ok_or(VizError::InvalidPrUrl)?;
    let number: u64 = caps[3].parse().map_err(|_| VizError::InvalidPrUrl)?;
    if number == 0 {
        return Err(VizError::InvalidPrUrl);
    }
    Ok(PrLocator {
        owner: caps[1].to_owned(),
        repo: caps[2].to_owned(),
        number,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/github/url.rs"]
mod tests;
