//! Scene components. Each scene is a pure function of its local frame and props returning a
//! [`Node`](crate::scene::Node) tree; nothing is cached between frames.

pub mod ci_status;
pub mod code_diff;
pub mod commits;
pub mod container;
pub mod file_diff;
pub mod final_scene;
pub mod stats;
pub mod title;

use crate::animation::spring::{Spring, SpringConfig};
use crate::foundation::core::{Canvas, Fps};
use crate::storage::theme::Palette;
use crate::timeline::config::VideoConfig;

/// Per-frame inputs shared by every scene.
#[derive(Clone, Copy, Debug)]
pub struct SceneCtx<'a> {
    /// Scene-local frame, 0 at the first frame the scene is visible.
    pub frame: f64,
    pub fps: Fps,
    pub canvas: Canvas,
    pub palette: &'a Palette,
    pub cfg: &'a VideoConfig,
}

impl<'a> SceneCtx<'a> {
    pub fn new(frame: f64, cfg: &'a VideoConfig, palette: &'a Palette) -> Self {
        Self {
            frame,
            fps: cfg.fps,
            canvas: cfg.canvas,
            palette,
            cfg,
        }
    }

    /// Same context shifted so `start` becomes frame 0.
    pub fn offset(&self, start: f64) -> Self {
        Self {
            frame: self.frame - start,
            ..*self
        }
    }

    /// Seconds to frames at the scene frame rate.
    pub fn secs(&self, s: f64) -> f64 {
        self.fps.secs_to_frames(s)
    }

    /// 0→1 spring progress at the current frame, starting after `delay_secs`.
    pub fn spring(&self, config: SpringConfig, delay_secs: f64) -> f64 {
        Spring::new(config)
            .delay(self.secs(delay_secs))
            .sample(self.frame, self.fps)
    }

    pub fn width(&self) -> f64 {
        f64::from(self.canvas.width)
    }

    pub fn height(&self) -> f64 {
        f64::from(self.canvas.height)
    }
}

pub use ci_status::{CiOverall, ci_status_scene, overall_status};
pub use code_diff::code_diff_scene;
pub use commits::commit_history_scene;
pub use container::{ContainerProps, scene_container};
pub use file_diff::{DiffLine, DiffLineKind, file_diff, resolve_patch};
pub use final_scene::final_scene;
pub use stats::stats_scene;
pub use title::title_scene;
