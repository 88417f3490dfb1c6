//! Turning node trees into pixels: image assets, SVG rasterization and the frame pipeline.

pub mod assets;
pub mod pipeline;
pub mod raster;

pub use assets::{AssetStore, HttpImageFetcher, ImageFetcher, normalize_rel_path};
pub use pipeline::{
    RenderStats, RenderThreading, frame_svg, render_frame, render_frames, render_to_sink,
};
pub use raster::SvgRasterizer;

/// One rendered frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8, tightly packed.
    pub data: Vec<u8>,
    /// `true` when `data` holds premultiplied alpha.
    pub premultiplied: bool,
}
