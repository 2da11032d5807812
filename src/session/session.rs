use std::path::{Path, PathBuf};
use std::sync::mpsc;

use anyhow::Context as _;

use crate::compose::frame::compose_frame;
use crate::config::DisplayOptions;
use crate::document::loader::{ContentType, load_path, load_str};
use crate::document::model::Document;
use crate::document::preview::render_preview;
use crate::encode::sink::{FrameSink, LastFrameSink, PngSequenceSink, TeeSink};
use crate::export::artifact::export_artifact;
use crate::export::presenter::{PresentedArtifact, present_artifact};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::cpu::CpuBackend;
use crate::render::text::FontSource;
use crate::session::synth::{ExportEvent, synthesize_frames};

/// Where an export run writes its output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportRequest {
    /// Directory receiving `json-video-<millis>.png`.
    pub out_dir: PathBuf,
    /// Also write every frame as a numbered PNG here.
    pub frames_dir: Option<PathBuf>,
}

impl ExportRequest {
    /// Export into `out_dir` only.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            frames_dir: None,
        }
    }
}

/// Outcome of a successful export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportReport {
    /// The written artifact.
    pub artifact: PresentedArtifact,
    /// Frames rendered.
    pub frames_rendered: u64,
    /// Directory holding the per-frame PNGs, if requested.
    pub frames_dir: Option<PathBuf>,
}

/// Emits [`ExportEvent::Started`] on creation and [`ExportEvent::Finished`] on drop.
struct Busy<'a> {
    observer: &'a mut dyn FnMut(ExportEvent),
    ok: bool,
}

impl<'a> Busy<'a> {
    fn start(observer: &'a mut dyn FnMut(ExportEvent), total_frames: u64) -> Self {
        observer(ExportEvent::Started { total_frames });
        Self {
            observer,
            ok: false,
        }
    }

    fn emit(&mut self, event: ExportEvent) {
        (self.observer)(event);
    }
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        (self.observer)(ExportEvent::Finished { ok: self.ok });
    }
}

/// Render `doc` with `opts` and write the final frame as an artifact.
#[tracing::instrument(skip(doc, font, observer))]
pub fn export_document(
    doc: &Document,
    opts: &DisplayOptions,
    font: Option<&FontSource>,
    request: &ExportRequest,
    observer: &mut dyn FnMut(ExportEvent),
) -> ReelResult<ExportReport> {
    let mut busy = Busy::start(observer, opts.total_frames());

    let mut backend = CpuBackend::new(font)?;
    let mut last = LastFrameSink::new();
    let frames_rendered = match &request.frames_dir {
        Some(dir) => {
            let mut seq = PngSequenceSink::new(dir);
            let mut tee = TeeSink::new(&mut seq, &mut last);
            run_frames(doc, opts, &mut backend, &mut tee, &mut busy)?
        }
        None => run_frames(doc, opts, &mut backend, &mut last, &mut busy)?,
    };

    let artifact = export_artifact(last.into_last().as_slice())?;
    let presented = present_artifact(&artifact, &request.out_dir)?;

    busy.ok = true;
    tracing::info!(
        frames = frames_rendered,
        path = %presented.path.display(),
        "export finished"
    );
    Ok(ExportReport {
        artifact: presented,
        frames_rendered,
        frames_dir: request.frames_dir.clone(),
    })
}

fn run_frames(
    doc: &Document,
    opts: &DisplayOptions,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
    busy: &mut Busy<'_>,
) -> ReelResult<u64> {
    synthesize_frames(doc, opts, backend, sink, &mut |event| busy.emit(event))
}

/// Handle to an export running on a background thread.
pub struct ExportHandle {
    events: mpsc::Receiver<ExportEvent>,
    join: std::thread::JoinHandle<ReelResult<ExportReport>>,
}

impl ExportHandle {
    /// Events in emission order; the channel closes when the run ends.
    pub fn events(&self) -> &mpsc::Receiver<ExportEvent> {
        &self.events
    }

    /// Wait for the run and return its result.
    pub fn join(self) -> ReelResult<ExportReport> {
        self.join
            .join()
            .map_err(|_| ReelError::export("export thread panicked"))?
    }
}

/// The page-level state: at most one loaded document plus the current display options.
///
/// Every stage is a method taking explicit inputs; nothing is global.
#[derive(Debug, Default)]
pub struct Session {
    document: Option<Document>,
    options: DisplayOptions,
    font: Option<FontSource>,
}

impl Session {
    /// Empty session with the given options and no font.
    pub fn new(options: DisplayOptions) -> Self {
        Self {
            document: None,
            options,
            font: None,
        }
    }

    /// Use `font` for all text.
    pub fn with_font(mut self, font: Option<FontSource>) -> Self {
        self.font = font;
        self
    }

    /// The loaded document, if any.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Current display options.
    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    /// Replace the display options; they are read at the next export.
    pub fn set_options(&mut self, options: DisplayOptions) {
        self.options = options;
    }

    /// `true` once a document has been loaded.
    pub fn export_enabled(&self) -> bool {
        self.document.is_some()
    }

    /// Load a document from disk, replacing the current one on success.
    ///
    /// On any error the previously loaded document stays in place.
    pub fn load_document(
        &mut self,
        path: &Path,
        content_type: Option<&ContentType>,
    ) -> ReelResult<&Document> {
        let doc = load_path(path, content_type)?;
        tracing::info!(path = %path.display(), "document loaded");
        Ok(self.document.insert(doc))
    }

    /// Load a document from text with a declared content type.
    pub fn load_str(&mut self, text: &str, content_type: &ContentType) -> ReelResult<&Document> {
        let doc = load_str(text, content_type)?;
        Ok(self.document.insert(doc))
    }

    /// Pretty-printed document, or `None` before the first load.
    pub fn render_preview(&self) -> Option<String> {
        self.document.as_ref().map(render_preview)
    }

    fn loaded(&self) -> ReelResult<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| ReelError::validation("no document loaded"))
    }

    /// Render a single frame of the current export configuration.
    pub fn render_frame(&self, frame: FrameIndex) -> ReelResult<FrameRGBA> {
        let doc = self.loaded()?;
        self.options.validate()?;
        let total = self.options.total_frames();
        if frame.0 >= total {
            return Err(ReelError::validation(format!(
                "frame {} is outside the {total} frames of this export",
                frame.0
            )));
        }
        let plan = compose_frame(doc, &self.options, frame, total);
        let mut backend = CpuBackend::new(self.font.as_ref())?;
        backend.render_plan(&plan)
    }

    /// Run the whole export on the calling thread.
    pub fn run_export(
        &self,
        request: &ExportRequest,
        observer: &mut dyn FnMut(ExportEvent),
    ) -> ReelResult<ExportReport> {
        let doc = self.loaded()?;
        export_document(doc, &self.options, self.font.as_ref(), request, observer)
    }

    /// Run the export on one background thread, streaming events over a channel.
    ///
    /// The document, options and font are snapshotted; later changes to the session do not
    /// affect the running export.
    pub fn spawn_export(&self, request: ExportRequest) -> ReelResult<ExportHandle> {
        let doc = self.loaded()?.clone();
        let options = self.options.clone();
        let font = self.font.clone();
        let (tx, rx) = mpsc::channel();

        let join = std::thread::Builder::new()
            .name("jsonreel-export".to_owned())
            .spawn(move || {
                let mut observer = |event: ExportEvent| {
                    let _ = tx.send(event);
                };
                export_document(&doc, &options, font.as_ref(), &request, &mut observer)
            })
            .context("spawn export thread")?;

        Ok(ExportHandle { events: rx, join })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/session.rs"]
mod tests;
