use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Point, Rect};

/// Zero-based index of a frame within an export run.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open range of frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex,
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> ReelResult<Self> {
        if start.0 > end.0 {
            return Err(ReelError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// `true` when the range covers no frames.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// `true` when `f` lies inside the range.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }

    /// Iterate the frame indices in order.
    pub fn iter(self) -> impl Iterator<Item = FrameIndex> {
        (self.start.0..self.end.0).map(FrameIndex)
    }
}

/// Integer frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps(pub u32);

impl Fps {
    /// Frame rate used for every export.
    pub const FIXED: Fps = Fps(30);

    /// Build a frame rate, rejecting zero.
    pub fn new(fps: u32) -> ReelResult<Self> {
        if fps == 0 {
            return Err(ReelError::validation("fps must be > 0"));
        }
        Ok(Self(fps))
    }

    /// Total frames for a whole-second duration.
    pub fn frames_for_secs(self, secs: u32) -> u64 {
        u64::from(secs) * u64::from(self.0)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self::FIXED
    }
}

/// Drawing surface size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The 1080p surface every frame is drawn on.
    pub const HD: Canvas = Canvas {
        width: 1920,
        height: 1080,
    };

    /// Horizontal center line.
    pub fn center_x(self) -> f64 {
        f64::from(self.width) / 2.0
    }

    /// Full-surface rectangle.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::HD
    }
}

/// Normalized elapsed fraction for `frame` out of `total` frames, in `[0, 1)`.
///
/// Returns `0.0` for an empty run.
pub fn progress_at(frame: FrameIndex, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    frame.0 as f64 / total as f64
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
