pub mod api;
pub mod client;
pub mod fetch;
pub mod model;
pub mod sample;
pub mod url;

pub use client::{GitHubClient, GitHubClientOpts, PullRequestSource};
pub use fetch::fetch_snapshot;
pub use model::{
    BranchRef, ChangedFile, CheckConclusion, CheckRun, CheckStatus, CommitRecord, FileStatus,
    PrState, PrStats, PullRequestSnapshot, UserRef,
};
pub use sample::sample_snapshot;
pub use url::{PrLocator, parse_pr_url};
