use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::png::encode_png;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::ReelResult;
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame size.
    pub canvas: Canvas,
    /// Frame rate.
    pub fps: Fps,
    /// Frames that will be pushed.
    pub total_frames: u64,
}

/// Consumer of rendered frames.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order, after one
/// `begin` and before one `end`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Push one frame in timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: FrameRGBA) -> ReelResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> ReelResult<()>;
}

/// Keeps every frame in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Take the captured frames.
    pub fn into_frames(self) -> Vec<FrameRGBA> {
        self.frames.into_iter().map(|(_, f)| f).collect()
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: FrameRGBA) -> ReelResult<()> {
        self.frames.push((idx, frame));
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        Ok(())
    }
}

/// Retains only the most recent frame; earlier frames are dropped as soon as the next arrives.
#[derive(Debug, Default)]
pub struct LastFrameSink {
    pushed: u64,
    last: Option<(FrameIndex, FrameRGBA)>,
}

impl LastFrameSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames pushed since `begin`.
    pub fn frames_seen(&self) -> u64 {
        self.pushed
    }

    /// Borrow the final frame.
    pub fn last(&self) -> Option<&(FrameIndex, FrameRGBA)> {
        self.last.as_ref()
    }

    /// Take the final frame.
    pub fn into_last(self) -> Option<FrameRGBA> {
        self.last.map(|(_, f)| f)
    }
}

impl FrameSink for LastFrameSink {
    fn begin(&mut self, _cfg: SinkConfig) -> ReelResult<()> {
        self.pushed = 0;
        self.last = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: FrameRGBA) -> ReelResult<()> {
        self.pushed += 1;
        self.last = Some((idx, frame));
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        Ok(())
    }
}

/// Writes every frame as `frame_NNNNN.png` into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far, in frame order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// File name used for frame `idx`.
    pub fn file_name(idx: FrameIndex) -> String {
        format!("frame_{:05}.png", idx.0)
    }

    fn dir(&self) -> &Path {
        &self.dir
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> ReelResult<()> {
        std::fs::create_dir_all(self.dir())
            .with_context(|| format!("create frames dir '{}'", self.dir.display()))?;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: FrameRGBA) -> ReelResult<()> {
        let path = self.dir.join(Self::file_name(idx));
        let bytes = encode_png(&frame)?;
        std::fs::write(&path, bytes)
            .with_context(|| format!("write frame '{}'", path.display()))?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        Ok(())
    }
}

/// Forwards each frame to two sinks; the first receives a clone.
pub struct TeeSink<'a> {
    first: &'a mut dyn FrameSink,
    second: &'a mut dyn FrameSink,
}

impl<'a> TeeSink<'a> {
    /// Combine two sinks.
    pub fn new(first: &'a mut dyn FrameSink, second: &'a mut dyn FrameSink) -> Self {
        Self { first, second }
    }
}

impl FrameSink for TeeSink<'_> {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.first.begin(cfg)?;
        self.second.begin(cfg)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: FrameRGBA) -> ReelResult<()> {
        self.first.push_frame(idx, frame.clone())?;
        self.second.push_frame(idx, frame)
    }

    fn end(&mut self) -> ReelResult<()> {
        self.first.end()?;
        self.second.end()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
