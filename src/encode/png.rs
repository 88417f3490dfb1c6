use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Serialize;

use crate::composition::PrComposition;
use crate::encode::ffmpeg::ensure_parent_dir;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::VizResult;
use crate::render::FrameRGBA;
use crate::render::pipeline::render_frame;
use crate::render::raster::SvgRasterizer;
use crate::scene::svg::ImageResolver;
use crate::timeline::{SceneKind, VisualizationTimeline};

/// One exported key frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Slide {
    pub kind: SceneKind,
    pub frame: FrameIndex,
    pub path: PathBuf,
}

/// Key frame of each scene: the middle of its solo (non-transition) part.
pub fn slide_frames(timeline: &VisualizationTimeline) -> Vec<(SceneKind, FrameIndex)> {
    timeline
        .segments()
        .iter()
        .map(|s| {
            let content = s.content_range();
            (s.kind, FrameIndex(content.start.0 + content.len_frames() / 2))
        })
        .collect()
}

fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}

/// Write `frame` as a straight-alpha PNG.
pub fn save_png(frame: &FrameRGBA, path: &Path) -> VizResult<()> {
    ensure_parent_dir(path)?;
    let mut data = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_in_place(&mut data);
    }
    image::save_buffer_with_format(
        path,
        &data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

/// Render one PNG per scene into `out_dir`, named `{nn}-{scene}.png`.
#[tracing::instrument(skip_all, fields(out_dir = %out_dir.display()))]
pub fn export_slides(
    comp: &PrComposition,
    raster: &SvgRasterizer,
    images: &dyn ImageResolver,
    out_dir: &Path,
) -> VizResult<Vec<Slide>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create slides dir '{}'", out_dir.display()))?;

    let mut slides = Vec::new();
    for (i, (kind, frame)) in slide_frames(comp.timeline()).into_iter().enumerate() {
        let path = out_dir.join(format!("{:02}-{}.png", i + 1, kind.as_str()));
        let pixels = render_frame(comp, frame, raster, images)?;
        save_png(&pixels, &path)?;
        tracing::debug!(scene = kind.as_str(), frame = frame.0, "slide written");
        slides.push(Slide { kind, frame, path });
    }
    tracing::info!(count = slides.len(), "slides exported");
    Ok(slides)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
