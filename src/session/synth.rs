use crate::compose::frame::compose_frame;
use crate::config::DisplayOptions;
use crate::document::model::Document;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, FrameRange, progress_at};
use crate::foundation::error::ReelResult;
use crate::render::backend::RenderBackend;

/// A progress checkpoint is reported every this many frames.
pub const PROGRESS_EVERY: u64 = 10;

/// Lifecycle notifications of one export run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExportEvent {
    /// The run started; `total_frames` will be rendered.
    Started {
        /// Frames in the run.
        total_frames: u64,
    },
    /// Checkpoint after rendering `frame`.
    Progress {
        /// Frame just rendered.
        frame: FrameIndex,
        /// Frames in the run.
        total_frames: u64,
        /// Progress of `frame`.
        progress: f64,
    },
    /// The run ended. Always delivered, on success and on failure.
    Finished {
        /// `true` when the artifact was produced.
        ok: bool,
    },
}

/// Render every frame of `doc` in order into `sink`.
///
/// Reports [`ExportEvent::Progress`] after frames 0, 10, 20, ... Returns the number of frames
/// rendered, which is always `duration × fps`.
pub fn synthesize_frames(
    doc: &Document,
    opts: &DisplayOptions,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
    observer: &mut dyn FnMut(ExportEvent),
) -> ReelResult<u64> {
    opts.validate()?;
    let total = opts.total_frames();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(total))?;

    sink.begin(SinkConfig {
        canvas: opts.canvas(),
        fps: opts.fps(),
        total_frames: total,
    })?;

    for idx in range.iter() {
        let plan = compose_frame(doc, opts, idx, total);
        let frame = backend.render_plan(&plan)?;
        sink.push_frame(idx, frame)?;

        if idx.0 % PROGRESS_EVERY == 0 {
            let progress = progress_at(idx, total);
            tracing::debug!(frame = idx.0, total, progress, "frame checkpoint");
            observer(ExportEvent::Progress {
                frame: idx,
                total_frames: total,
                progress,
            });
        }
    }

    sink.end()?;
    Ok(range.len_frames())
}

#[cfg(test)]
#[path = "../../tests/unit/session/synth.rs"]
mod tests;
