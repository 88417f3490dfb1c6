use serde::{Deserialize, Serialize};

use crate::github::model::PullRequestSnapshot;
use crate::timeline::config::VideoConfig;

/// The scenes a video can contain, in playback order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    Title,
    Stats,
    CodeDiff,
    CommitHistory,
    CiStatus,
    Final,
}

impl SceneKind {
    pub const ALL: [SceneKind; 6] = [
        Self::Title,
        Self::Stats,
        Self::CodeDiff,
        Self::CommitHistory,
        Self::CiStatus,
        Self::Final,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Stats => "stats",
            Self::CodeDiff => "code_diff",
            Self::CommitHistory => "commit_history",
            Self::CiStatus => "ci_status",
            Self::Final => "final",
        }
    }
}

/// A scene that made it into the video and its content length.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct IncludedScene {
    pub kind: SceneKind,
    pub seconds: f64,
}

/// Number of files the code-diff scene walks through.
pub fn files_shown(snapshot: &PullRequestSnapshot, cfg: &VideoConfig) -> usize {
    snapshot.files.len().min(cfg.max_files_shown)
}

/// Scenes backed by data in `snapshot`, in playback order.
///
/// Title, stats and final are always present. Code diff needs at least one file, commit
/// history at least one commit, CI status at least one check run. Both the duration
/// calculation and the timeline layout are derived from this list.
pub fn included_scenes(snapshot: &PullRequestSnapshot, cfg: &VideoConfig) -> Vec<IncludedScene> {
    let files = files_shown(snapshot, cfg);
    SceneKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let seconds = match kind {
                SceneKind::Title => cfg.title_secs,
                SceneKind::Stats => cfg.stats_secs,
                SceneKind::CodeDiff if files > 0 => files as f64 * cfg.per_file_secs,
                SceneKind::CommitHistory if !snapshot.commits.is_empty() => cfg.commits_secs,
                SceneKind::CiStatus if !snapshot.check_runs.is_empty() => cfg.ci_secs,
                SceneKind::Final => cfg.final_secs,
                _ => return None,
            };
            (seconds > 0.0).then_some(IncludedScene { kind, seconds })
        })
        .collect()
}
