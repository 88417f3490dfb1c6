//! Frame sinks: in-memory capture, `ffmpeg` WebM encoding and PNG stills.

pub mod ffmpeg;
pub mod png;
pub mod sink;

pub use ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use png::{Slide, export_slides, save_png, slide_frames};
pub use sink::{FrameSink, InMemorySink, SinkConfig};
