//! Playback host: owns a mounted composition, a frame clock and an optional recording.

use crate::composition::PrComposition;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::VizError;
use crate::render::FrameRGBA;
use crate::render::assets::AssetStore;
use crate::render::pipeline::{RenderStats, RenderThreading, render_frame, render_frames};
use crate::render::raster::SvgRasterizer;
use crate::timeline::VideoMetadata;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    /// No composition mounted yet.
    Loading,
    Ready,
    Playing,
    Paused,
    Recording,
}

#[derive(thiserror::Error, Debug)]
pub enum PlayerError {
    #[error("player is not ready")]
    NotReady,

    #[error("a recording is already in progress")]
    AlreadyRecording,

    #[error("no recording in progress")]
    NotRecording,

    #[error("recording produced no frames")]
    EmptyRecording,

    #[error(transparent)]
    Render(#[from] VizError),
}

/// Frames rendered so far by the active recording.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordProgress {
    pub done: u64,
    pub total: u64,
}

impl RecordProgress {
    pub fn is_complete(&self) -> bool {
        self.done >= self.total
    }
}

struct Recording {
    sink: Box<dyn FrameSink>,
    next: u64,
    stats: RenderStats,
}

type ReadyCallback = Box<dyn FnMut(&VideoMetadata)>;
type ErrorCallback = Box<dyn FnMut(&PlayerError)>;
type FrameCallback = Box<dyn FnMut(FrameIndex)>;

pub struct Player {
    raster: SvgRasterizer,
    threading: RenderThreading,
    comp: Option<PrComposition>,
    images: AssetStore,
    state: PlayerState,
    frame: FrameIndex,
    recording: Option<Recording>,
    last_error: Option<String>,
    on_ready: Option<ReadyCallback>,
    on_error: Option<ErrorCallback>,
    on_frame: Option<FrameCallback>,
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("state", &self.state)
            .field("frame", &self.frame)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl Player {
    pub fn new(raster: SvgRasterizer, threading: RenderThreading) -> Self {
        Self {
            raster,
            threading,
            comp: None,
            images: AssetStore::default(),
            state: PlayerState::Loading,
            frame: FrameIndex(0),
            recording: None,
            last_error: None,
            on_ready: None,
            on_error: None,
            on_frame: None,
        }
    }

    pub fn on_ready(&mut self, f: impl FnMut(&VideoMetadata) + 'static) {
        self.on_ready = Some(Box::new(f));
    }

    pub fn on_error(&mut self, f: impl FnMut(&PlayerError) + 'static) {
        self.on_error = Some(Box::new(f));
    }

    pub fn on_frame(&mut self, f: impl FnMut(FrameIndex) + 'static) {
        self.on_frame = Some(Box::new(f));
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn current_frame(&self) -> FrameIndex {
        self.frame
    }

    pub fn composition(&self) -> Option<&PrComposition> {
        self.comp.as_ref()
    }

    pub fn metadata(&self) -> Option<VideoMetadata> {
        self.comp.as_ref().map(PrComposition::metadata)
    }

    /// Message of the last failure, kept until dismissed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Replace the mounted composition and rewind to frame 0.
    pub fn mount(&mut self, comp: PrComposition, images: AssetStore) -> Result<(), PlayerError> {
        if self.state == PlayerState::Recording {
            return Err(self.fail(PlayerError::AlreadyRecording));
        }
        let meta = comp.metadata();
        self.comp = Some(comp);
        self.images = images;
        self.frame = FrameIndex(0);
        self.state = PlayerState::Ready;
        tracing::info!(total_frames = meta.total_frames, "composition mounted");
        if let Some(cb) = self.on_ready.as_mut() {
            cb(&meta);
        }
        Ok(())
    }

    /// Report a failure that happened before a composition could be mounted.
    pub fn load_failed(&mut self, err: VizError) {
        let _ = self.fail(PlayerError::Render(err));
    }

    pub fn play(&mut self) -> Result<(), PlayerError> {
        let total = self.playable_total()?;
        if self.frame.0 + 1 >= total {
            self.frame = FrameIndex(0);
        }
        self.state = PlayerState::Playing;
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), PlayerError> {
        self.playable_total()?;
        if self.state == PlayerState::Playing {
            self.state = PlayerState::Paused;
        }
        Ok(())
    }

    /// Jump to `f`, clamped to the last frame.
    pub fn seek(&mut self, f: FrameIndex) -> Result<FrameIndex, PlayerError> {
        let total = self.playable_total()?;
        self.frame = FrameIndex(f.0.min(total.saturating_sub(1)));
        self.emit_frame(self.frame);
        Ok(self.frame)
    }

    /// Advance the clock by one frame while playing, or render the next chunk while recording.
    ///
    /// Playback stops on the last frame.
    pub fn tick(&mut self) -> Result<Option<FrameIndex>, PlayerError> {
        match self.state {
            PlayerState::Playing => {
                let total = self.playable_total()?;
                if self.frame.0 + 1 < total {
                    self.frame = FrameIndex(self.frame.0 + 1);
                    self.emit_frame(self.frame);
                } else {
                    self.state = PlayerState::Paused;
                }
                Ok(Some(self.frame))
            }
            PlayerState::Recording => {
                self.record_step()?;
                Ok(None)
            }
            _ => Ok(None),
        }
    }

    /// Pixels of the current frame.
    pub fn render_current(&self) -> Result<FrameRGBA, PlayerError> {
        let comp = self.comp.as_ref().ok_or(PlayerError::NotReady)?;
        Ok(render_frame(comp, self.frame, &self.raster, &self.images)?)
    }

    /// Start streaming every frame into `sink`. Frames are produced by [`Player::record_step`].
    pub fn start_recording(&mut self, mut sink: Box<dyn FrameSink>) -> Result<(), PlayerError> {
        match self.state {
            PlayerState::Loading => return Err(self.fail(PlayerError::NotReady)),
            PlayerState::Recording => return Err(self.fail(PlayerError::AlreadyRecording)),
            _ => {}
        }
        let Some(meta) = self.metadata() else {
            return Err(self.fail(PlayerError::NotReady));
        };
        if let Err(e) = sink.begin(SinkConfig {
            width: meta.width,
            height: meta.height,
            fps: meta.fps,
        }) {
            return Err(self.fail(e.into()));
        }
        self.recording = Some(Recording {
            sink,
            next: 0,
            stats: RenderStats::default(),
        });
        self.state = PlayerState::Recording;
        tracing::info!(total_frames = meta.total_frames, "recording started");
        Ok(())
    }

    /// Render and push the next chunk; finishes the recording after the last one.
    pub fn record_step(&mut self) -> Result<RecordProgress, PlayerError> {
        let total = self.comp.as_ref().map_or(0, PrComposition::total_frames);
        let Some(mut rec) = self.recording.take() else {
            return Err(PlayerError::NotRecording);
        };

        if rec.next < total {
            match self.render_chunk(&mut rec, total) {
                Ok(()) => {}
                Err(e) => {
                    self.state = PlayerState::Ready;
                    return Err(self.fail(e));
                }
            }
        }

        let progress = RecordProgress {
            done: rec.next,
            total,
        };
        if !progress.is_complete() {
            self.recording = Some(rec);
            return Ok(progress);
        }

        self.state = PlayerState::Ready;
        rec.sink.end().map_err(|e| self.fail(e.into()))?;
        if rec.stats.frames_total == 0 {
            return Err(self.fail(PlayerError::EmptyRecording));
        }
        tracing::info!(
            frames = rec.stats.frames_total,
            elided = rec.stats.frames_elided,
            "recording finished"
        );
        Ok(progress)
    }

    /// Record every frame into `sink`, blocking until done.
    pub fn record(&mut self, sink: Box<dyn FrameSink>) -> Result<RecordProgress, PlayerError> {
        self.start_recording(sink)?;
        loop {
            let progress = self.record_step()?;
            if progress.is_complete() {
                return Ok(progress);
            }
        }
    }

    /// Drop the active recording without finishing the sink.
    pub fn cancel_recording(&mut self) -> Result<(), PlayerError> {
        if self.recording.take().is_none() {
            return Err(PlayerError::NotRecording);
        }
        self.state = PlayerState::Ready;
        tracing::warn!("recording cancelled");
        Ok(())
    }

    fn render_chunk(&mut self, rec: &mut Recording, total: u64) -> Result<(), PlayerError> {
        let comp = self.comp.as_ref().ok_or(PlayerError::NotReady)?;
        let end = (rec.next + self.threading.chunk_size.max(1) as u64).min(total);
        let range = FrameRange::new(FrameIndex(rec.next), FrameIndex(end))?;
        let (frames, stats) =
            render_frames(comp, range, &self.raster, &self.images, &self.threading)?;
        for (i, frame) in frames.iter().enumerate() {
            let idx = FrameIndex(range.start.0 + i as u64);
            rec.sink.push_frame(idx, frame)?;
            self.emit_frame(idx);
        }
        rec.next = end;
        rec.stats.frames_total += stats.frames_total;
        rec.stats.frames_rendered += stats.frames_rendered;
        rec.stats.frames_elided += stats.frames_elided;
        Ok(())
    }

    fn playable_total(&mut self) -> Result<u64, PlayerError> {
        match (self.state, self.comp.as_ref()) {
            (PlayerState::Recording, _) => Err(PlayerError::AlreadyRecording),
            (PlayerState::Loading, _) | (_, None) => Err(PlayerError::NotReady),
            (_, Some(comp)) => Ok(comp.total_frames()),
        }
    }

    fn emit_frame(&mut self, f: FrameIndex) {
        if let Some(cb) = self.on_frame.as_mut() {
            cb(f);
        }
    }

    fn fail(&mut self, err: PlayerError) -> PlayerError {
        tracing::warn!(error = %err, "player error");
        self.last_error = Some(err.to_string());
        if let Some(cb) = self.on_error.as_mut() {
            cb(&err);
        }
        err
    }
}

#[cfg(test)]
#[path = "../tests/unit/player.rs"]
mod tests;
