//! pr-visualizer turns a GitHub pull request into a short animated video summary.
//!
//! The flow is:
//!
//! - Fetch a [`PullRequestSnapshot`] through a [`PullRequestSource`] (optionally with an AI
//!   review insight)
//! - Build a [`PrComposition`]: the included scenes laid out on a [`VisualizationTimeline`]
//! - Render frames to pixels and stream them into a [`FrameSink`], directly or through a
//!   [`Player`]
#![forbid(unsafe_code)]

mod foundation;

pub mod animation;
pub mod composition;
pub mod encode;
pub mod github;
pub mod insight;
pub mod player;
pub mod render;
pub mod scene;
pub mod scenes;
pub mod storage;
pub mod timeline;

pub use crate::foundation::core::{
    Affine, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8, Transform2D, Vec2,
};
pub use crate::foundation::error::{VizError, VizResult};

pub use crate::composition::PrComposition;
pub use crate::encode::{FfmpegSink, FfmpegSinkOpts, FrameSink, InMemorySink, SinkConfig};
pub use crate::github::{
    GitHubClient, GitHubClientOpts, PullRequestSnapshot, PullRequestSource, fetch_snapshot,
    parse_pr_url, sample_snapshot,
};
pub use crate::insight::{GeminiInsights, GeminiOpts, InsightGenerator};
pub use crate::player::{Player, PlayerError, PlayerState};
pub use crate::render::{
    AssetStore, FrameRGBA, HttpImageFetcher, RenderStats, RenderThreading, SvgRasterizer,
};
pub use crate::storage::{FileStore, HistoryStore, KeyValueStore, MemoryStore, Theme, ThemeStore};
pub use crate::timeline::{
    VideoConfig, VideoMetadata, VisualizationTimeline, calculate_video_duration,
};
