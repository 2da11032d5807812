use super::*;
use crate::compose::frame::{bar_color, compose_frame};
use crate::compose::plan::Layer;
use crate::config::DisplayOptions;
use crate::document::model::Document;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Canvas, FrameIndex};
use serde_json::json;

fn small_plan() -> FramePlan {
    let canvas = Canvas {
        width: 32,
        height: 16,
    };
    let mut plan = FramePlan::new(canvas, 0.0);
    plan.fill_rect(Layer::Background, canvas.rect(), Rgba8::rgb(10, 20, 30));
    plan.fill_rect(
        Layer::ProgressFill,
        Rect::new(0.0, 0.0, 16.0, 16.0),
        Rgba8::rgb(200, 0, 0),
    );
    plan.fill_rect(
        Layer::ProgressTrack,
        Rect::new(20.0, 0.0, 20.0, 16.0),
        Rgba8::rgb(0, 200, 0),
    );
    plan
}

#[test]
fn paints_rects_in_order() {
    let mut backend = CpuBackend::without_text();
    let frame = backend.render_plan(&small_plan()).unwrap();
    assert_eq!(frame.width, 32);
    assert_eq!(frame.height, 16);
    assert_eq!(frame.data.len(), 32 * 16 * 4);
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(4, 8), Some([200, 0, 0, 255]));
    assert_eq!(frame.pixel(28, 8), Some([10, 20, 30, 255]));
    // zero-width rect paints nothing
    assert_eq!(frame.pixel(20, 8), Some([10, 20, 30, 255]));
    assert_eq!(frame.pixel(32, 0), None);
}

#[test]
fn reused_context_gives_identical_frames() {
    let mut backend = CpuBackend::without_text();
    let a = backend.render_plan(&small_plan()).unwrap();
    let b = backend.render_plan(&small_plan()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn text_without_font_is_skipped() {
    let mut backend = CpuBackend::new(None).unwrap();
    assert!(!backend.draws_text());
    let canvas = Canvas {
        width: 8,
        height: 8,
    };
    let mut plan = FramePlan::new(canvas, 0.0);
    plan.fill_rect(Layer::Background, canvas.rect(), Rgba8::rgb(1, 2, 3));
    plan.text(
        Layer::Title,
        TextOp {
            text: "hi".to_owned(),
            x: 4.0,
            baseline_y: 6.0,
            size_px: 8.0,
            bold: true,
            color: Rgba8::WHITE,
        },
    );
    let frame = backend.render_plan(&plan).unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == [1, 2, 3, 255]));
}

#[test]
fn empty_canvas_is_rejected() {
    let plan = FramePlan::new(
        Canvas {
            width: 0,
            height: 4,
        },
        0.0,
    );
    let mut backend = CpuBackend::without_text();
    assert!(matches!(
        backend.render_plan(&plan),
        Err(ReelError::Render(_))
    ));
}

#[test]
fn chart_bars_fill_proportionally_on_hd_canvas() {
    let doc = Document::from_value(json!({
        "title": "T",
        "data": [{"name": "A", "value": 10}, {"name": "B", "value": 20}]
    }));
    let opts = DisplayOptions {
        duration_secs: 1,
        ..DisplayOptions::default()
    };
    let plan = compose_frame(&doc, &opts, FrameIndex(29), 30);
    let mut backend = CpuBackend::without_text();
    let frame = backend.render_plan(&plan).unwrap();

    // Bar A spans x in [660, 950), bar B spans [660, 1240); rows at y 380 and 460.
    let a_fill = bar_color(0).premultiplied();
    let b_fill = bar_color(1).premultiplied();
    assert_eq!(frame.pixel(700, 395), Some(a_fill));
    assert_eq!(frame.pixel(940, 395), Some(a_fill));
    assert_ne!(frame.pixel(1000, 395), Some(a_fill));
    assert_eq!(frame.pixel(1200, 475), Some(b_fill));
    assert_ne!(frame.pixel(1250, 475), Some(b_fill));

    // Outside any bar the background shows through untouched.
    assert_eq!(frame.pixel(50, 50), Some(opts.background.premultiplied()));
}
