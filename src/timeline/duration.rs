use serde::Serialize;

use crate::foundation::core::Fps;
use crate::github::model::PullRequestSnapshot;
use crate::timeline::config::VideoConfig;
use crate::timeline::included::included_scenes;

/// Length and geometry of the video for one snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct VideoMetadata {
    pub total_frames: u64,
    pub width: u32,
    pub height: u32,
    pub fps: Fps,
}

/// Total frame count of the video for `snapshot`.
///
/// Without a snapshot this is `default_secs` of video. Otherwise it is the sum of the included
/// scenes' lengths plus one transition per adjacent pair, rounded up to whole frames.
pub fn calculate_video_duration(
    snapshot: Option<&PullRequestSnapshot>,
    cfg: &VideoConfig,
) -> VideoMetadata {
    let total_secs = match snapshot {
        None => cfg.default_secs,
        Some(snapshot) => {
            let scenes = included_scenes(snapshot, cfg);
            let content: f64 = scenes.iter().map(|s| s.seconds).sum();
            let transitions = scenes.len().saturating_sub(1) as f64;
            content + transitions * cfg.transition_secs
        }
    };

    VideoMetadata {
        total_frames: cfg.fps.secs_to_frames_ceil(total_secs),
        width: cfg.canvas.width,
        height: cfg.canvas.height,
        fps: cfg.fps,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/duration.rs"]
mod tests;
