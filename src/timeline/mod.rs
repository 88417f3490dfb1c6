//! Scene selection, video length and the frame layout of scenes and transitions.

pub mod config;
pub mod duration;
pub mod included;
pub mod segments;

pub use config::VideoConfig;
pub use duration::{VideoMetadata, calculate_video_duration};
pub use included::{IncludedScene, SceneKind, files_shown, included_scenes};
pub use segments::{ActiveScenes, Presentation, SceneSegment, VisualizationTimeline};
