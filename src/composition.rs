//! Composition root: one snapshot, one timeline, one node tree per frame.

use crate::foundation::core::{FrameIndex, Transform2D};
use crate::foundation::error::VizResult;
use crate::foundation::math::clamp01;
use crate::github::model::PullRequestSnapshot;
use crate::scene::node::{ImageSource, Node};
use crate::scenes::commits::recent_commits;
use crate::scenes::{
    SceneCtx, ci_status_scene, code_diff_scene, commit_history_scene, final_scene, stats_scene,
    title_scene,
};
use crate::storage::theme::{Palette, Theme};
use crate::timeline::{
    ActiveScenes, Presentation, SceneKind, VideoConfig, VideoMetadata, VisualizationTimeline,
    calculate_video_duration, files_shown,
};

/// Everything needed to draw any frame of one visualization.
#[derive(Clone, Debug)]
pub struct PrComposition {
    snapshot: PullRequestSnapshot,
    cfg: VideoConfig,
    palette: Palette,
    timeline: VisualizationTimeline,
    title_background: Option<ImageSource>,
}

impl PrComposition {
    pub fn new(snapshot: PullRequestSnapshot, cfg: VideoConfig, theme: Theme) -> VizResult<Self> {
        cfg.validate()?;
        let timeline = VisualizationTimeline::build(&snapshot, &cfg);
        Ok(Self {
            snapshot,
            palette: theme.palette(),
            cfg,
            timeline,
            title_background: None,
        })
    }

    /// Image drawn faintly behind the title scene.
    pub fn with_title_background(mut self, background: Option<ImageSource>) -> Self {
        self.title_background = background;
        self
    }

    pub fn snapshot(&self) -> &PullRequestSnapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &VideoConfig {
        &self.cfg
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn timeline(&self) -> &VisualizationTimeline {
        &self.timeline
    }

    pub fn metadata(&self) -> VideoMetadata {
        calculate_video_duration(Some(&self.snapshot), &self.cfg)
    }

    pub fn total_frames(&self) -> u64 {
        self.timeline.total_frames()
    }

    /// Every image any frame may reference, without duplicates.
    pub fn image_sources(&self) -> Vec<ImageSource> {
        let snap = &self.snapshot;
        let mut out: Vec<ImageSource> = Vec::new();
        let mut push = |url: Option<&str>| {
            if let Some(src) = url.filter(|u| !u.is_empty()).map(ImageSource::parse)
                && !out.contains(&src)
            {
                out.push(src);
            }
        };
        push(self.title_background.as_ref().map(ImageSource::key));
        push(snap.author.as_ref().and_then(|a| a.avatar_url.as_deref()));
        if self.timeline.segment_of(SceneKind::CommitHistory).is_some() {
            for c in recent_commits(&snap.commits, self.cfg.max_commits_shown) {
                push(c.avatar_url.as_deref());
            }
        }
        if snap.is_merged() {
            push(snap.merged_by.as_ref().and_then(|u| u.avatar_url.as_deref()));
        }
        out
    }

    /// Scene tree for `kind` at its scene-local frame.
    pub fn scene_node(&self, kind: SceneKind, local: u64) -> Node {
        let ctx = SceneCtx::new(local as f64, &self.cfg, &self.palette);
        let snap = &self.snapshot;
        match kind {
            SceneKind::Title => title_scene(&ctx, snap, self.title_background.as_ref()),
            SceneKind::Stats => stats_scene(&ctx, &snap.stats),
            SceneKind::CodeDiff => code_diff_scene(
                &ctx,
                &snap.files[..files_shown(snap, &self.cfg)],
                &snap.diff,
                snap.insight.as_deref(),
            ),
            SceneKind::CommitHistory => commit_history_scene(&ctx, &snap.commits),
            SceneKind::CiStatus => ci_status_scene(&ctx, &snap.check_runs),
            SceneKind::Final => final_scene(&ctx, snap),
        }
    }

    /// Node tree of frame `f`: the active scene, or two scenes blended inside a transition.
    pub fn frame_node(&self, f: FrameIndex) -> Node {
        let segments = self.timeline.segments();
        match self.timeline.active_at(f) {
            ActiveScenes::Nothing => Node::empty(),
            ActiveScenes::Single { segment, local } => {
                self.scene_node(segments[segment].kind, local)
            }
            ActiveScenes::Transition {
                outgoing,
                outgoing_local,
                incoming,
                incoming_local,
                presentation,
                progress,
            } => {
                let out = self.scene_node(segments[outgoing].kind, outgoing_local);
                let inc = self.scene_node(segments[incoming].kind, incoming_local);
                let w = f64::from(self.cfg.canvas.width);
                let h = f64::from(self.cfg.canvas.height);
                blend(out, inc, presentation, progress, w, h)
            }
        }
    }
}

/// Draw `incoming` over `outgoing` at transition `progress`.
///
/// Slides move both scenes by one canvas; fades only change the incoming opacity.
pub fn blend(
    outgoing: Node,
    incoming: Node,
    presentation: Presentation,
    progress: f64,
    width: f64,
    height: f64,
) -> Node {
    let p = clamp01(progress);
    let (out_t, in_t, in_opacity) = match presentation {
        Presentation::Fade => (Transform2D::default(), Transform2D::default(), p),
        Presentation::SlideFromRight => (
            Transform2D::translate(-width * p, 0.0),
            Transform2D::translate(width * (1.0 - p), 0.0),
            1.0,
        ),
        Presentation::SlideFromBottom => (
            Transform2D::translate(0.0, -height * p),
            Transform2D::translate(0.0, height * (1.0 - p)),
            1.0,
        ),
        Presentation::SlideFromTop => (
            Transform2D::translate(0.0, height * p),
            Transform2D::translate(0.0, -height * (1.0 - p)),
            1.0,
        ),
    };
    Node::group(vec![
        Node::layer(out_t, 1.0, vec![outgoing]),
        Node::layer(in_t, in_opacity, vec![incoming]),
    ])
}

#[cfg(test)]
#[path = "../tests/unit/composition.rs"]
mod tests;
