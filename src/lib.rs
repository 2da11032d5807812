//! jsonreel turns a JSON document into an animated bar-chart frame sequence and exports the
//! final frame as a PNG still.
//!
//! # Pipeline overview
//!
//! 1. **Load**: declared content type check, then `text -> Document` (`serde_json`).
//! 2. **Compose**: `Document + DisplayOptions + FrameIndex -> FramePlan` (pure display list).
//! 3. **Render**: `FramePlan -> FrameRGBA` on the CPU (`vello_cpu`, text shaped by `parley`).
//! 4. **Sink**: every frame flows into a [`FrameSink`]; the export keeps only the last one.
//! 5. **Export**: last frame -> PNG [`Artifact`] -> `json-video-<unix-millis>.png` on disk.
//!
//! All state lives in an explicit [`Session`]; there is no process-wide singleton.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compose;
mod document;
mod encode;
mod export;
mod foundation;
mod render;
mod session;

/// Display options and file-backed configuration.
pub mod config;
/// Tracing subscriber setup.
pub mod logging;

pub use compose::frame::{
    BAR_TRACK_WIDTH, PROGRESS_FILL_COLOR, bar_color, bar_fill_width, compose_frame, time_label,
};
pub use compose::plan::{DrawOp, FramePlan, Layer, PlanOp, TextOp};
pub use config::{DisplayOptions, LoggingConfig, ReelConfig};
pub use document::loader::{ContentType, ensure_json, load_path, load_str};
pub use document::model::{Document, Item};
pub use document::preview::{preview_lines, render_preview};
pub use encode::png::{encode_png, to_straight_rgba8};
pub use encode::sink::{
    FrameSink, InMemorySink, LastFrameSink, PngSequenceSink, SinkConfig, TeeSink,
};
pub use export::artifact::{
    ARTIFACT_PREFIX, Artifact, ArtifactKind, artifact_file_name, export_artifact, now_unix_millis,
};
pub use export::presenter::{PresentedArtifact, present_artifact};
pub use foundation::color::Rgba8;
pub use foundation::core::{Canvas, Fps, FrameIndex, FrameRange, Point, Rect, progress_at};
pub use foundation::error::{ReelError, ReelResult};
pub use render::backend::{FrameRGBA, RenderBackend};
pub use render::cpu::CpuBackend;
pub use render::text::{
    FontSource, LineLayout, TextBrushRgba8, TextLayoutEngine, pick_font_path,
};
pub use session::session::{
    ExportHandle, ExportReport, ExportRequest, Session, export_document,
};
pub use session::synth::{ExportEvent, PROGRESS_EVERY, synthesize_frames};
