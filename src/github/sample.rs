//! Built-in snapshot for previewing the video without network access.

use chrono::{DateTime, Utc};

use crate::github::model::{
    BranchRef, ChangedFile, CheckConclusion, CheckRun, CheckStatus, CommitRecord, FileStatus,
    PrState, PrStats, PullRequestSnapshot, UserRef,
};

const SAMPLE_EPOCH_SECS: i64 = 1_714_564_800;

fn commit(sha: &str, message: &str, name: &str, login: &str) -> CommitRecord {
    CommitRecord {
        sha: sha.to_owned(),
        message: message.to_owned(),
        author_name: Some(name.to_owned()),
        author_login: Some(login.to_owned()),
        avatar_url: Some("https://placehold.co/40x40.png".to_owned()),
        authored_at: DateTime::<Utc>::from_timestamp(SAMPLE_EPOCH_SECS, 0),
    }
}

fn passing_check(id: u64, name: &str) -> CheckRun {
    CheckRun {
        id,
        name: name.to_owned(),
        status: CheckStatus::Completed,
        conclusion: Some(CheckConclusion::Success),
    }
}

/// An open PR with three commits, two files and two green checks.
pub fn sample_snapshot() -> PullRequestSnapshot {
    let created_at = DateTime::<Utc>::from_timestamp(SAMPLE_EPOCH_SECS, 0);
    PullRequestSnapshot {
        number: 1,
        url: "https://github.com/example/repo/pull/1".to_owned(),
        title: "Default PR Title: Fix an amazing bug".to_owned(),
        author: Some(UserRef {
            login: "defaultUser".to_owned(),
            avatar_url: Some("https://placehold.co/80x80.png".to_owned()),
        }),
        state: PrState::Open,
        merged_at: None,
        merged_by: None,
        head: BranchRef {
            name: "feature-branch".to_owned(),
            sha: "headsha".to_owned(),
        },
        base: BranchRef {
            name: "main".to_owned(),
            sha: "basesha".to_owned(),
        },
        repo_full_name: Some("example/repo".to_owned()),
        stats: PrStats {
            commits: 3,
            comments: 2,
            review_comments: 1,
            additions: 100,
            deletions: 50,
            changed_files: 5,
        },
        body: Some("This is a default PR body description.".to_owned()),
        created_at,
        commits: vec![
            commit("c1", "First commit: Initial work", "User A", "UserA"),
            commit("c2", "Second commit: Add new feature", "User B", "UserB"),
            commit("c3", "Third commit: Refactor and fix tests", "User A", "UserA"),
        ],
        files: vec![
            ChangedFile {
                filename: "src/components/Feature.tsx".to_owned(),
                status: FileStatus::Modified,
                additions: 50,
                deletions: 10,
                patch: Some(
                    "@@ -1 +1,2 @@\n-old line\n+new line\n+another new line".to_owned(),
                ),
                previous_filename: None,
            },
            ChangedFile {
                filename: "README.md".to_owned(),
                status: FileStatus::Added,
                additions: 10,
                deletions: 0,
                patch: Some("@@ -0,0 +1 @@\n+Hello World".to_owned()),
                previous_filename: None,
            },
        ],
        diff: concat!(
            "diff --git a/src/components/Feature.tsx b/src/components/Feature.tsx\n",
            "index 123..456 100644\n",
            "--- a/src/components/Feature.tsx\n",
            "+++ b/src/components/Feature.tsx\n",
            "@@ -1,1 +1,2 @@\n",
            "-Hello\n",
            "+Hello World\n",
            "+New Line\n",
            "diff --git a/README.md b/README.md\n",
            "--- /dev/null\n",
            "+++ b/README.md\n",
            "@@ -0,0 +1 @@\n",
            "+Hello World",
        )
        .to_owned(),
        check_runs: vec![passing_check(1, "Build"), passing_check(2, "Test Suite")],
        insight: Some(
            "This PR introduces a new feature and updates the README. Key changes include \
             modifications to Feature.tsx and the addition of a new line. All checks have passed."
                .to_owned(),
        ),
    }
}
