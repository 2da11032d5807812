use crate::foundation::color::Rgba8;
use crate::foundation::core::{Canvas, Rect};

/// A single line of text, horizontally centered on `x`.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOp {
    /// The text to draw; never contains newlines.
    pub text: String,
    /// Horizontal center.
    pub x: f64,
    /// Baseline y.
    pub baseline_y: f64,
    /// Font size in pixels.
    pub size_px: f32,
    /// Request a bold face.
    pub bold: bool,
    /// Fill color.
    pub color: Rgba8,
}

/// Drawing primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Source-over fill of an axis-aligned rectangle.
    FillRect {
        /// Target rectangle in canvas pixels.
        rect: Rect,
        /// Fill color (straight alpha).
        color: Rgba8,
    },
    /// One line of text.
    Text(TextOp),
}

/// What part of the frame an op belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Full-surface fill.
    Background,
    /// Centered title.
    Title,
    /// Text row for item `n`.
    ItemLabel(usize),
    /// Translucent track behind item `n`'s bar.
    ItemTrack(usize),
    /// Animated foreground of item `n`'s bar.
    ItemFill(usize),
    /// Line `n` of the whole-document dump.
    DumpLine(usize),
    /// Global progress track.
    ProgressTrack,
    /// Global progress foreground.
    ProgressFill,
    /// Elapsed/total label.
    TimeLabel,
}

/// One draw op tagged with its layer.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanOp {
    /// Frame part.
    pub layer: Layer,
    /// Primitive.
    pub op: DrawOp,
}

/// Ordered display list for one frame. Ops are painted in order.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    /// Target surface.
    pub canvas: Canvas,
    /// Normalized progress this plan was built for.
    pub progress: f64,
    /// Draw ops in paint order.
    pub ops: Vec<PlanOp>,
}

impl FramePlan {
    pub(crate) fn new(canvas: Canvas, progress: f64) -> Self {
        Self {
            canvas,
            progress,
            ops: Vec::new(),
        }
    }

    pub(crate) fn fill_rect(&mut self, layer: Layer, rect: Rect, color: Rgba8) {
        self.ops.push(PlanOp {
            layer,
            op: DrawOp::FillRect { rect, color },
        });
    }

    pub(crate) fn text(&mut self, layer: Layer, text: TextOp) {
        self.ops.push(PlanOp {
            layer,
            op: DrawOp::Text(text),
        });
    }

    /// First op on `layer`.
    pub fn find(&self, layer: Layer) -> Option<&DrawOp> {
        self.ops.iter().find(|o| o.layer == layer).map(|o| &o.op)
    }

    /// Rectangle of the first fill on `layer`.
    pub fn rect_of(&self, layer: Layer) -> Option<Rect> {
        match self.find(layer)? {
            DrawOp::FillRect { rect, .. } => Some(*rect),
            DrawOp::Text(_) => None,
        }
    }

    /// Text of the first text op on `layer`.
    pub fn text_of(&self, layer: Layer) -> Option<&str> {
        match self.find(layer)? {
            DrawOp::Text(t) => Some(t.text.as_str()),
            DrawOp::FillRect { .. } => None,
        }
    }

    /// Iterate all text ops in paint order.
    pub fn texts(&self) -> impl Iterator<Item = (Layer, &TextOp)> {
        self.ops.iter().filter_map(|o| match &o.op {
            DrawOp::Text(t) => Some((o.layer, t)),
            DrawOp::FillRect { .. } => None,
        })
    }
}
