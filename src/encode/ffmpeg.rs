use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{VizError, VizResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::FrameRGBA;

/// Options for [`FfmpegSink`] WebM output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    pub out_path: PathBuf,
    pub overwrite: bool,
    /// Background used to flatten alpha (RGBA8, straight alpha).
    pub bg_rgba: [u8; 4],
    /// VP9 constant-quality level, lower is better (0..=63).
    pub crf: u8,
}

impl FfmpegSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            bg_rgba: [0, 0, 0, 255],
            crf: 32,
        }
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw frames to its stdin as VP9 WebM.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoder: Option<Encoder>,
}

/// One running `ffmpeg` process, alive between `begin` and `end`.
struct Encoder {
    cfg: SinkConfig,
    child: Child,
    stdin: Option<ChildStdin>,
    log: std::thread::JoinHandle<std::io::Result<String>>,
    /// One opaque frame, reused for every push.
    opaque: Vec<u8>,
    next_min: u64,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoder: None,
        }
    }

    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    fn encoder_mut(&mut self) -> VizResult<&mut Encoder> {
        self.encoder
            .as_mut()
            .ok_or_else(|| VizError::encode("WebM encoder is not running; call begin first"))
    }
}

/// `ffmpeg` arguments after the global flags, up to and including the output path.
fn encode_args(cfg: &SinkConfig, opts: &FfmpegSinkOpts) -> Vec<String> {
    let mut args: Vec<String> = [
        "-loglevel",
        "error",
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgba",
        "-s",
    ]
    .iter()
    .map(|s| (*s).to_owned())
    .collect();
    args.push(format!("{}x{}", cfg.width, cfg.height));
    args.push("-r".to_owned());
    args.push(fps_arg(cfg.fps));
    args.extend(
        [
            "-i",
            "pipe:0",
            "-an",
            "-c:v",
            "libvpx-vp9",
            "-pix_fmt",
            "yuv420p",
            "-b:v",
            "0",
            "-crf",
        ]
        .iter()
        .map(|s| (*s).to_owned()),
    );
    args.push(opts.crf.min(63).to_string());
    args.push(opts.out_path.display().to_string());
    args
}

fn fps_arg(fps: Fps) -> String {
    format!("{}/{}", fps.num, fps.den)
}

fn check_canvas(cfg: &SinkConfig) -> VizResult<()> {
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(VizError::validation("video fps must be non-zero"));
    }
    if cfg.width == 0 || cfg.height == 0 {
        return Err(VizError::validation("video canvas must not be empty"));
    }
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(VizError::validation(format!(
            "video canvas {}x{} must have even sides for yuv420p WebM",
            cfg.width, cfg.height
        )));
    }
    Ok(())
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> VizResult<()> {
        check_canvas(&cfg)?;
        if self.encoder.is_some() {
            return Err(VizError::encode("WebM encoder is already running"));
        }
        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(VizError::validation(format!(
                "refusing to replace existing video '{}'",
                self.opts.out_path.display()
            )));
        }
        if !is_ffmpeg_on_path() {
            return Err(VizError::encode(
                "rendering a WebM needs `ffmpeg` on PATH, and none was found",
            ));
        }

        let mut cmd = Command::new("ffmpeg");
        cmd.arg(if self.opts.overwrite { "-y" } else { "-n" })
            .args(encode_args(&cfg, &self.opts))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        tracing::debug!(?cmd, "starting WebM encoder");

        let mut child = cmd
            .spawn()
            .map_err(|e| VizError::encode(format!("could not start ffmpeg: {e}")))?;
        let stdin = child.stdin.take();
        let stderr = child.stderr.take();
        let (Some(stdin), Some(mut stderr)) = (stdin, stderr) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(VizError::encode("ffmpeg started without piped stdio"));
        };
        // ffmpeg blocks once its stderr pipe fills, so it is read on its own thread.
        let log = std::thread::spawn(move || {
            let mut text = String::new();
            stderr.read_to_string(&mut text)?;
            Ok(text)
        });

        self.encoder = Some(Encoder {
            opaque: vec![0; cfg.width as usize * cfg.height as usize * 4],
            cfg,
            child,
            stdin: Some(stdin),
            log,
            next_min: 0,
        });
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> VizResult<()> {
        let bg = self.opts.bg_rgba;
        let enc = self.encoder_mut()?;
        if idx.0 < enc.next_min {
            return Err(VizError::encode(format!(
                "frame {} arrived after frame {}; frames must be pushed in timeline order",
                idx.0,
                enc.next_min - 1
            )));
        }
        if (frame.width, frame.height) != (enc.cfg.width, enc.cfg.height) {
            return Err(VizError::validation(format!(
                "frame {} is {}x{} but the video is {}x{}",
                idx.0, frame.width, frame.height, enc.cfg.width, enc.cfg.height
            )));
        }
        flatten_over_background(&mut enc.opaque, &frame.data, frame.premultiplied, bg)?;

        let stdin = enc
            .stdin
            .as_mut()
            .ok_or_else(|| VizError::encode("WebM encoder input is already closed"))?;
        stdin
            .write_all(&enc.opaque)
            .map_err(|e| VizError::encode(format!("ffmpeg stopped accepting frame {}: {e}", idx.0)))?;
        enc.next_min = idx.0 + 1;
        Ok(())
    }

    fn end(&mut self) -> VizResult<()> {
        let Some(mut enc) = self.encoder.take() else {
            return Err(VizError::encode("WebM encoder is not running; call begin first"));
        };
        // Closing stdin is ffmpeg's end-of-stream.
        drop(enc.stdin.take());
        let status = enc
            .child
            .wait()
            .map_err(|e| VizError::encode(format!("lost track of ffmpeg: {e}")))?;
        let log = match enc.log.join() {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => format!("<unreadable ffmpeg log: {e}>"),
            Err(_) => "<ffmpeg log reader panicked>".to_owned(),
        };
        if !status.success() {
            return Err(VizError::encode(format!(
                "ffmpeg failed ({status}) while writing '{}': {}",
                self.opts.out_path.display(),
                log.trim()
            )));
        }
        tracing::info!(path = %self.opts.out_path.display(), "video written");
        Ok(())
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if let Some(mut enc) = self.encoder.take() {
            drop(enc.stdin.take());
            let _ = enc.child.kill();
            let _ = enc.child.wait();
        }
    }
}

/// Composite one RGBA8 pixel over an opaque background colour.
fn over_background(px: &[u8], premultiplied: bool, bg: [u8; 4]) -> [u8; 4] {
    let alpha = u16::from(px[3]);
    if alpha == 255 {
        return [px[0], px[1], px[2], 255];
    }
    let behind = 255 - alpha;
    let mut out = [0, 0, 0, 255];
    for c in 0..3 {
        let front = if premultiplied {
            u16::from(px[c])
        } else {
            mul_div255_u16(u16::from(px[c]), alpha)
        };
        out[c] = (front + mul_div255_u16(u16::from(bg[c]), behind)).min(255) as u8;
    }
    out
}

/// Write `src` composited over `bg` into `dst` as opaque RGBA8.
pub(crate) fn flatten_over_background(
    dst: &mut [u8],
    src: &[u8],
    premultiplied: bool,
    bg: [u8; 4],
) -> VizResult<()> {
    if dst.len() != src.len() || !src.len().is_multiple_of(4) {
        return Err(VizError::validation(format!(
            "frame buffer holds {} bytes, expected {}",
            src.len(),
            dst.len()
        )));
    }
    for (out, px) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        out.copy_from_slice(&over_background(px, premultiplied, bg));
    }
    Ok(())
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> VizResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
