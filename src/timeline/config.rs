use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{VizError, VizResult};

/// Video constants: frame rate, canvas and per-scene lengths.
///
/// `Default` reproduces the stock video (24 fps, 1280x720). Every field may be overridden from a
/// JSON file; missing fields keep their default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub fps: Fps,
    pub canvas: Canvas,
    pub title_secs: f64,
    pub stats_secs: f64,
    /// Length of each file's sub-window inside the code-diff scene.
    pub per_file_secs: f64,
    pub max_files_shown: usize,
    pub commits_secs: f64,
    pub ci_secs: f64,
    pub final_secs: f64,
    /// Overlap between two adjacent scenes.
    pub transition_secs: f64,
    pub max_commits_shown: usize,
    /// Length used when there is no snapshot at all.
    pub default_secs: f64,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            fps: Fps { num: 24, den: 1 },
            canvas: Canvas {
                width: 1280,
                height: 720,
            },
            title_secs: 4.0,
            stats_secs: 5.0,
            per_file_secs: 5.0,
            max_files_shown: 3,
            commits_secs: 5.0,
            ci_secs: 3.0,
            final_secs: 4.0,
            transition_secs: 0.5,
            max_commits_shown: 4,
            default_secs: 15.0,
        }
    }
}

impl VideoConfig {
    /// Load overrides from a JSON file and validate the result.
    pub fn from_json_file(path: &Path) -> VizResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .map_err(|e| VizError::serde(format!("config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations whose timeline could not be laid out on whole frames.
    pub fn validate(&self) -> VizResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(VizError::validation("canvas width/height must be > 0"));
        }
        if self.canvas.width % 2 != 0 || self.canvas.height % 2 != 0 {
            return Err(VizError::validation(
                "canvas width/height must be even for yuv420 encoding",
            ));
        }
        if self.max_files_shown == 0 {
            return Err(VizError::validation("max_files_shown must be > 0"));
        }
        if self.max_commits_shown == 0 {
            return Err(VizError::validation("max_commits_shown must be > 0"));
        }

        let lengths = [
            ("title_secs", self.title_secs, true),
            ("stats_secs", self.stats_secs, true),
            ("per_file_secs", self.per_file_secs, true),
            ("commits_secs", self.commits_secs, true),
            ("ci_secs", self.ci_secs, true),
            ("final_secs", self.final_secs, true),
            ("transition_secs", self.transition_secs, false),
            ("default_secs", self.default_secs, true),
        ];
        for (name, secs, must_be_positive) in lengths {
            if !secs.is_finite() || secs < 0.0 || (must_be_positive && secs == 0.0) {
                return Err(VizError::validation(format!(
                    "{name} must be a finite {} number, got {secs}",
                    if must_be_positive { "positive" } else { "non-negative" }
                )));
            }
            let frames = self.fps.secs_to_frames(secs);
            if (frames - frames.round()).abs() > 1e-6 {
                return Err(VizError::validation(format!(
                    "{name} = {secs}s is not a whole number of frames at {} fps",
                    self.fps.as_f64()
                )));
            }
        }
        Ok(())
    }

    /// Whole-frame length of `secs` at this frame rate.
    pub fn frames(&self, secs: f64) -> u64 {
        self.fps.secs_to_frames_ceil(secs)
    }

    pub fn transition_frames(&self) -> u64 {
        self.frames(self.transition_secs)
    }

    pub fn per_file_frames(&self) -> u64 {
        self.frames(self.per_file_secs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/config.rs"]
mod tests;
