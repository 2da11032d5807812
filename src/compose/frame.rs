use crate::compose::plan::{FramePlan, Layer, TextOp};
use crate::config::DisplayOptions;
use crate::document::model::Document;
use crate::document::preview::preview_lines;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{FrameIndex, Rect, progress_at};

pub(crate) const TITLE_BASELINE_Y: f64 = 200.0;
pub(crate) const TITLE_SCALE: f32 = 1.5;

pub(crate) const ITEMS_START_Y: f64 = 350.0;
pub(crate) const ITEM_ROW_HEIGHT: f64 = 80.0;
/// Bar track width in pixels.
pub const BAR_TRACK_WIDTH: f64 = 600.0;
pub(crate) const BAR_HEIGHT: f64 = 30.0;
pub(crate) const BAR_OFFSET_Y: f64 = 30.0;
pub(crate) const BAR_HUE_STEP_DEG: f64 = 60.0;

pub(crate) const DUMP_START_Y: f64 = 300.0;
pub(crate) const DUMP_LINE_HEIGHT_SCALE: f64 = 1.2;

pub(crate) const PROGRESS_MARGIN_X: f64 = 100.0;
pub(crate) const PROGRESS_BOTTOM_OFFSET: f64 = 50.0;
pub(crate) const PROGRESS_HEIGHT: f64 = 20.0;
pub(crate) const TIME_LABEL_BOTTOM_OFFSET: f64 = 80.0;
pub(crate) const TIME_LABEL_SCALE: f32 = 0.8;

fn item_track_color() -> Rgba8 {
    Rgba8::rgba(255, 255, 255, 0.2)
}

fn progress_track_color() -> Rgba8 {
    Rgba8::rgba(255, 255, 255, 0.3)
}

/// Foreground color of the global progress bar.
pub const PROGRESS_FILL_COLOR: Rgba8 = Rgba8::rgb(0x4c, 0xaf, 0x50);

/// Bar color for the item at `index`: hue steps of 60 degrees, 70% saturation, 60% lightness.
pub fn bar_color(index: usize) -> Rgba8 {
    Rgba8::from_hsl(index as f64 * BAR_HUE_STEP_DEG, 0.7, 0.6)
}

/// Width of an item's animated fill.
///
/// `track_width × (value / max) × progress`, with the ratio clamped to `[0, 1]`. A non-positive
/// or non-finite `max` draws no fill.
pub fn bar_fill_width(track_width: f64, value: f64, max: f64, progress: f64) -> f64 {
    if !(max.is_finite() && max > 0.0) || !value.is_finite() {
        return 0.0;
    }
    let ratio = (value / max).clamp(0.0, 1.0);
    track_width * ratio * progress.clamp(0.0, 1.0)
}

/// `"Time: 1.5s / 3s"`.
pub fn time_label(progress: f64, duration_secs: u32) -> String {
    format!(
        "Time: {:.1}s / {}s",
        progress * f64::from(duration_secs),
        duration_secs
    )
}

/// Build the display list for frame `frame` of `total`.
pub fn compose_frame(
    doc: &Document,
    opts: &DisplayOptions,
    frame: FrameIndex,
    total: u64,
) -> FramePlan {
    let canvas = opts.canvas();
    let progress = progress_at(frame, total);
    let cx = canvas.center_x();
    let width = f64::from(canvas.width);
    let height = f64::from(canvas.height);
    let font_size = opts.font_size_px as f32;

    let mut plan = FramePlan::new(canvas, progress);
    plan.fill_rect(Layer::Background, canvas.rect(), opts.background);

    let centered = |text: String, baseline_y: f64, size_px: f32, bold: bool| TextOp {
        text,
        x: cx,
        baseline_y,
        size_px,
        bold,
        color: opts.text_color,
    };

    plan.text(
        Layer::Title,
        centered(doc.title(), TITLE_BASELINE_Y, font_size * TITLE_SCALE, true),
    );

    match doc.items() {
        Some(items) => {
            let max = doc.max_item_value().unwrap_or(0.0);
            let bar_x = (width - BAR_TRACK_WIDTH) / 2.0;
            for item in &items {
                let i = item.index();
                let y = ITEMS_START_Y + i as f64 * ITEM_ROW_HEIGHT;
                plan.text(Layer::ItemLabel(i), centered(item.label(), y, font_size, false));

                let Some(value) = item.bar_value() else {
                    continue;
                };
                let bar_y = y + BAR_OFFSET_Y;
                plan.fill_rect(
                    Layer::ItemTrack(i),
                    Rect::new(bar_x, bar_y, bar_x + BAR_TRACK_WIDTH, bar_y + BAR_HEIGHT),
                    item_track_color(),
                );
                let fill_w = bar_fill_width(BAR_TRACK_WIDTH, value, max, progress);
                plan.fill_rect(
                    Layer::ItemFill(i),
                    Rect::new(bar_x, bar_y, bar_x + fill_w, bar_y + BAR_HEIGHT),
                    bar_color(i),
                );
            }
        }
        None => {
            let line_height = f64::from(opts.font_size_px) * DUMP_LINE_HEIGHT_SCALE;
            for (k, line) in preview_lines(doc).into_iter().enumerate() {
                let y = DUMP_START_Y + k as f64 * line_height;
                plan.text(Layer::DumpLine(k), centered(line, y, font_size, false));
            }
        }
    }

    let track_y = height - PROGRESS_BOTTOM_OFFSET;
    let track_w = width - 2.0 * PROGRESS_MARGIN_X;
    plan.fill_rect(
        Layer::ProgressTrack,
        Rect::new(
            PROGRESS_MARGIN_X,
            track_y,
            PROGRESS_MARGIN_X + track_w,
            track_y + PROGRESS_HEIGHT,
        ),
        progress_track_color(),
    );
    plan.fill_rect(
        Layer::ProgressFill,
        Rect::new(
            PROGRESS_MARGIN_X,
            track_y,
            PROGRESS_MARGIN_X + track_w * progress,
            track_y + PROGRESS_HEIGHT,
        ),
        PROGRESS_FILL_COLOR,
    );

    plan.text(
        Layer::TimeLabel,
        centered(
            time_label(progress, opts.duration_secs),
            height - TIME_LABEL_BOTTOM_OFFSET,
            font_size * TIME_LABEL_SCALE,
            false,
        ),
    );

    plan
}

#[cfg(test)]
#[path = "../../tests/unit/compose/frame.rs"]
mod tests;
