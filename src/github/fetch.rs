use crate::foundation::error::VizResult;
use crate::github::client::PullRequestSource;
use crate::github::model::PullRequestSnapshot;
use crate::github::url::parse_pr_url;
use crate::insight::InsightGenerator;

/// Fetches everything a visualization needs for `pr_url`.
///
/// Requests run one after another: metadata, commits, diff, files, check runs for the head SHA.
/// Insight generation runs last; its failure is logged and the snapshot is returned without it.
/// An invalid URL is rejected before any request is made.
#[tracing::instrument(skip(source, insights))]
pub fn fetch_snapshot(
    source: &dyn PullRequestSource,
    insights: Option<&dyn InsightGenerator>,
    pr_url: &str,
) -> VizResult<PullRequestSnapshot> {
    let pr = parse_pr_url(pr_url)?;

    let details = source.pull_request(&pr)?;
    let commits = source.commits(&pr)?;
    let diff = source.diff(&pr)?;
    let files = source.files(&pr)?;
    let check_runs = if details.head.sha.is_empty() {
        Vec::new()
    } else {
        source.check_runs(&pr, &details.head.sha)?
    };
    tracing::info!(
        commits = commits.len(),
        files = files.len(),
        check_runs = check_runs.len(),
        diff_bytes = diff.len(),
        "fetched pull request"
    );

    let insight = match insights {
        Some(generator) if !diff.is_empty() => match generator.generate(&diff) {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::warn!(error = %err, "failed to extract code insights; continuing without");
                None
            }
        },
        _ => None,
    };

    let state = details.derived_state();
    let stats = details.stats();
    let head = details.head_ref();
    let base = details.base_ref();
    let repo_full_name = details.base.repo.map(|r| r.full_name);

    Ok(PullRequestSnapshot {
        number: details.number,
        url: details.html_url,
        title: details.title,
        author: details.user.map(Into::into),
        state,
        merged_at: details.merged_at,
        merged_by: details.merged_by.map(Into::into),
        head,
        base,
        repo_full_name,
        stats,
        body: details.body.filter(|b| !b.is_empty()),
        created_at: details.created_at,
        commits,
        files,
        diff,
        check_runs,
        insight,
    })
}
