use std::collections::HashMap;

use rayon::prelude::*;
use xxhash_rust::xxh3::xxh3_128_with_seed;

use crate::composition::PrComposition;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{VizError, VizResult};
use crate::render::FrameRGBA;
use crate::render::raster::SvgRasterizer;
use crate::scene::svg::{ImageResolver, to_svg};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
    /// Rasterize identical frames within a chunk only once.
    pub static_frame_elision: bool,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
            static_frame_elision: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_rendered: u64,
    pub frames_elided: u64,
}

impl RenderStats {
    fn add(&mut self, other: RenderStats) {
        self.frames_total += other.frames_total;
        self.frames_rendered += other.frames_rendered;
        self.frames_elided += other.frames_elided;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct FrameFingerprint {
    hi: u64,
    lo: u64,
}

const XXH3_SEED: u64 = 0x8b5a_d4a0_c7d8_e9f1;

/// Frame identity for static-frame elision. The frame index is not part of the hash, so a still
/// scene elides across time.
fn fingerprint_svg(svg: &str) -> FrameFingerprint {
    let h = xxh3_128_with_seed(svg.as_bytes(), XXH3_SEED);
    FrameFingerprint {
        hi: (h >> 64) as u64,
        lo: h as u64,
    }
}

/// SVG document of frame `f`.
pub fn frame_svg(comp: &PrComposition, f: FrameIndex, images: &dyn ImageResolver) -> String {
    to_svg(
        &comp.frame_node(f),
        comp.config().canvas,
        comp.palette().background,
        images,
    )
}

/// Evaluate and rasterize a single frame.
///
/// Returns **premultiplied** RGBA8 pixels.
#[tracing::instrument(skip_all, fields(frame = f.0))]
pub fn render_frame(
    comp: &PrComposition,
    f: FrameIndex,
    raster: &SvgRasterizer,
    images: &dyn ImageResolver,
) -> VizResult<FrameRGBA> {
    if f.0 >= comp.total_frames() {
        return Err(VizError::validation(format!(
            "frame {} is outside the video (0..{})",
            f.0,
            comp.total_frames()
        )));
    }
    let canvas = comp.config().canvas;
    raster.rasterize(&frame_svg(comp, f, images), canvas.width, canvas.height)
}

/// Render `range` into memory.
pub fn render_frames(
    comp: &PrComposition,
    range: FrameRange,
    raster: &SvgRasterizer,
    images: &dyn ImageResolver,
    threading: &RenderThreading,
) -> VizResult<(Vec<FrameRGBA>, RenderStats)> {
    validate_range(comp, range)?;
    let pool = threading
        .parallel
        .then(|| build_thread_pool(threading.threads))
        .transpose()?;

    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    let mut stats = RenderStats::default();
    for chunk in chunks(range, threading.chunk_size) {
        let (mut frames, chunk_stats) =
            render_chunk(comp, chunk, raster, images, threading, pool.as_ref())?;
        out.append(&mut frames);
        stats.add(chunk_stats);
    }
    Ok((out, stats))
}

/// Render `range` chunk by chunk and stream the frames to `sink` in timeline order.
///
/// `on_frame` is called after each frame reaches the sink.
#[tracing::instrument(skip_all, fields(start = range.start.0, end = range.end.0))]
pub fn render_to_sink(
    comp: &PrComposition,
    range: FrameRange,
    raster: &SvgRasterizer,
    images: &dyn ImageResolver,
    threading: &RenderThreading,
    sink: &mut dyn FrameSink,
    on_frame: &mut dyn FnMut(FrameIndex),
) -> VizResult<RenderStats> {
    validate_range(comp, range)?;
    let pool = threading
        .parallel
        .then(|| build_thread_pool(threading.threads))
        .transpose()?;

    let meta = comp.metadata();
    sink.begin(SinkConfig {
        width: meta.width,
        height: meta.height,
        fps: meta.fps,
    })?;

    let mut stats = RenderStats::default();
    for chunk in chunks(range, threading.chunk_size) {
        let (frames, chunk_stats) =
            render_chunk(comp, chunk, raster, images, threading, pool.as_ref())?;
        for (i, frame) in frames.iter().enumerate() {
            let idx = FrameIndex(chunk.start.0 + i as u64);
            sink.push_frame(idx, frame)?;
            on_frame(idx);
        }
        stats.add(chunk_stats);
        tracing::debug!(done = chunk.end.0, "chunk rendered");
    }
    sink.end()?;

    tracing::info!(
        frames = stats.frames_total,
        rendered = stats.frames_rendered,
        elided = stats.frames_elided,
        "render finished"
    );
    Ok(stats)
}

fn validate_range(comp: &PrComposition, range: FrameRange) -> VizResult<()> {
    if range.is_empty() {
        return Err(VizError::validation("render range must be non-empty"));
    }
    if range.end.0 > comp.total_frames() {
        return Err(VizError::validation(
            "render range must be within the video duration",
        ));
    }
    Ok(())
}

fn chunks(range: FrameRange, chunk_size: usize) -> impl Iterator<Item = FrameRange> {
    let size = chunk_size.max(1) as u64;
    (range.start.0..range.end.0)
        .step_by(size as usize)
        .map(move |s| FrameRange::with_len(FrameIndex(s), size.min(range.end.0 - s)))
}

fn render_chunk(
    comp: &PrComposition,
    range: FrameRange,
    raster: &SvgRasterizer,
    images: &dyn ImageResolver,
    threading: &RenderThreading,
    pool: Option<&rayon::ThreadPool>,
) -> VizResult<(Vec<FrameRGBA>, RenderStats)> {
    let canvas = comp.config().canvas;
    let svgs: Vec<String> = (range.start.0..range.end.0)
        .map(|f| frame_svg(comp, FrameIndex(f), images))
        .collect();

    let mut unique_indices = Vec::<usize>::with_capacity(svgs.len());
    let mut frame_to_unique = Vec::<usize>::with_capacity(svgs.len());
    if threading.static_frame_elision {
        let mut first = HashMap::<FrameFingerprint, usize>::new();
        for (idx, svg) in svgs.iter().enumerate() {
            let slot = *first.entry(fingerprint_svg(svg)).or_insert_with(|| {
                unique_indices.push(idx);
                unique_indices.len() - 1
            });
            frame_to_unique.push(slot);
        }
    } else {
        unique_indices.extend(0..svgs.len());
        frame_to_unique.extend(0..svgs.len());
    }

    let raster_one = |idx: &usize| raster.rasterize(&svgs[*idx], canvas.width, canvas.height);
    let rendered: Vec<VizResult<FrameRGBA>> = match pool {
        Some(pool) => pool.install(|| unique_indices.par_iter().map(raster_one).collect()),
        None => unique_indices.iter().map(raster_one).collect(),
    };
    let unique_frames = rendered.into_iter().collect::<VizResult<Vec<_>>>()?;

    let out = frame_to_unique
        .iter()
        .map(|&u| unique_frames[u].clone())
        .collect();

    let total = svgs.len() as u64;
    let rendered_count = unique_frames.len() as u64;
    Ok((
        out,
        RenderStats {
            frames_total: total,
            frames_rendered: rendered_count,
            frames_elided: total - rendered_count,
        },
    ))
}

fn build_thread_pool(threads: Option<usize>) -> VizResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(VizError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| VizError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
