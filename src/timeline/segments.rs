use serde::Serialize;

use crate::animation::spring::{Spring, SpringConfig};
use crate::foundation::core::{Fps, FrameIndex, FrameRange};
use crate::github::model::PullRequestSnapshot;
use crate::timeline::config::VideoConfig;
use crate::timeline::included::{SceneKind, included_scenes};

/// How the incoming scene replaces the outgoing one during a transition window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presentation {
    Fade,
    SlideFromRight,
    SlideFromBottom,
    SlideFromTop,
}

impl Presentation {
    /// Presentation used when entering `kind`.
    pub fn entering(kind: SceneKind) -> Self {
        match kind {
            SceneKind::Stats => Self::SlideFromRight,
            SceneKind::CommitHistory => Self::SlideFromBottom,
            SceneKind::Final => Self::SlideFromTop,
            SceneKind::Title | SceneKind::CodeDiff | SceneKind::CiStatus => Self::Fade,
        }
    }
}

/// Spring driving every transition, stretched over the transition window.
pub fn transition_spring() -> SpringConfig {
    SpringConfig::new(150.0, 200.0).mass(0.8)
}

/// One scene placed on the timeline.
///
/// The segment is visible for `lead_in + content + tail` frames from `start`. The lead-in
/// overlaps the previous segment's tail; both equal the transition length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SceneSegment {
    pub kind: SceneKind,
    pub start: FrameIndex,
    pub lead_in: u64,
    pub content: u64,
    pub tail: u64,
}

impl SceneSegment {
    /// Frames during which the segment is drawn.
    pub fn range(&self) -> FrameRange {
        FrameRange::with_len(self.start, self.lead_in + self.content + self.tail)
    }

    /// Frames during which the segment is drawn alone.
    pub fn content_range(&self) -> FrameRange {
        FrameRange::with_len(FrameIndex(self.start.0 + self.lead_in), self.content)
    }

    /// Scene-local frame: 0 at the start of the lead-in.
    pub fn local_frame(&self, f: FrameIndex) -> Option<u64> {
        self.range().local(f)
    }
}

/// What must be drawn at a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ActiveScenes {
    /// Past the end of the timeline.
    Nothing,
    Single {
        segment: usize,
        local: u64,
    },
    /// Two segments blended by `presentation` at `progress` in `[0, 1]`.
    Transition {
        outgoing: usize,
        outgoing_local: u64,
        incoming: usize,
        incoming_local: u64,
        presentation: Presentation,
        progress: f64,
    },
}

/// Scene segments of one video, derived from the same scene list as its duration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisualizationTimeline {
    segments: Vec<SceneSegment>,
    total_frames: u64,
    transition_frames: u64,
    fps: Fps,
}

impl VisualizationTimeline {
    pub fn build(snapshot: &PullRequestSnapshot, cfg: &VideoConfig) -> Self {
        let scenes = included_scenes(snapshot, cfg);
        let transition = cfg.transition_frames();
        let n = scenes.len();

        let mut segments = Vec::with_capacity(n);
        let mut start = 0u64;
        for (i, scene) in scenes.iter().enumerate() {
            let lead_in = if i > 0 { transition } else { 0 };
            let tail = if i + 1 < n { transition } else { 0 };
            let content = cfg.frames(scene.seconds);
            segments.push(SceneSegment {
                kind: scene.kind,
                start: FrameIndex(start),
                lead_in,
                content,
                tail,
            });
            start += lead_in + content;
        }

        let total_frames = segments
            .last()
            .map(|s| s.range().end.0)
            .unwrap_or_default();
        tracing::debug!(scenes = n, total_frames, "built timeline");

        Self {
            segments,
            total_frames,
            transition_frames: transition,
            fps: cfg.fps,
        }
    }

    pub fn segments(&self) -> &[SceneSegment] {
        &self.segments
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn transition_frames(&self) -> u64 {
        self.transition_frames
    }

    pub fn fps(&self) -> Fps {
        self.fps
    }

    pub fn segment_of(&self, kind: SceneKind) -> Option<&SceneSegment> {
        self.segments.iter().find(|s| s.kind == kind)
    }

    /// Segments visible at `f` and, inside a transition window, the blend progress.
    pub fn active_at(&self, f: FrameIndex) -> ActiveScenes {
        let Some(incoming) = self
            .segments
            .iter()
            .rposition(|s| s.range().contains(f))
        else {
            return ActiveScenes::Nothing;
        };
        let seg = &self.segments[incoming];
        let local = f.0 - seg.start.0;

        if incoming > 0 && local < seg.lead_in {
            let outgoing = incoming - 1;
            let prev = &self.segments[outgoing];
            let progress = Spring::new(transition_spring())
                .duration(seg.lead_in as f64)
                .sample(local as f64, self.fps)
                .clamp(0.0, 1.0);
            return ActiveScenes::Transition {
                outgoing,
                outgoing_local: f.0 - prev.start.0,
                incoming,
                incoming_local: local,
                presentation: Presentation::entering(seg.kind),
                progress,
            };
        }

        ActiveScenes::Single {
            segment: incoming,
            local,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/segments.rs"]
mod tests;
