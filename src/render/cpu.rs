use crate::compose::plan::{DrawOp, FramePlan, TextOp};
use crate::foundation::core::Rect;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::text::{FontSource, TextBrushRgba8, TextLayoutEngine};

struct TextPainter {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

/// CPU rasterizer powered by `vello_cpu`, shaping text with `parley`.
///
/// Without a font, text ops are skipped and only rectangles are painted.
pub struct CpuBackend {
    ctx: Option<vello_cpu::RenderContext>,
    text: Option<TextPainter>,
    warned_no_font: bool,
}

impl CpuBackend {
    /// Build a backend that draws text with `font`, if any.
    pub fn new(font: Option<&FontSource>) -> ReelResult<Self> {
        let text = match font {
            Some(font) => {
                let engine = TextLayoutEngine::new(font)?;
                tracing::debug!(family = engine.family_name(), origin = font.origin(), "font registered");
                Some(TextPainter {
                    engine,
                    font: vello_cpu::peniko::FontData::new(
                        vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
                        0,
                    ),
                })
            }
            None => None,
        };
        Ok(Self {
            ctx: None,
            text,
            warned_no_font: false,
        })
    }

    /// Backend that only paints rectangles.
    pub fn without_text() -> Self {
        Self {
            ctx: None,
            text: None,
            warned_no_font: true,
        }
    }

    /// `true` when text ops will be drawn.
    pub fn draws_text(&self) -> bool {
        self.text.is_some()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> ReelResult<R>,
    ) -> ReelResult<R> {
        let mut ctx = match self.ctx.take() {
            None => vello_cpu::RenderContext::new(width, height),
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            Some(_) => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn draw_text(&mut self, ctx: &mut vello_cpu::RenderContext, t: &TextOp) -> ReelResult<()> {
        if t.text.is_empty() {
            return Ok(());
        }
        let Some(painter) = self.text.as_mut() else {
            if !self.warned_no_font {
                tracing::warn!("no font available; skipping text");
                self.warned_no_font = true;
            }
            return Ok(());
        };

        let brush = TextBrushRgba8 {
            r: t.color.r,
            g: t.color.g,
            b: t.color.b,
            a: t.color.a,
        };
        let line = painter
            .engine
            .layout_line(&t.text, t.size_px, t.bold, brush)?;

        let left = t.x - f64::from(line.width) / 2.0;
        let top = t.baseline_y - f64::from(line.baseline);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((left, top)));

        for layout_line in line.layout.lines() {
            for item in layout_line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&painter.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

impl RenderBackend for CpuBackend {
    fn render_plan(&mut self, plan: &FramePlan) -> ReelResult<FrameRGBA> {
        let width = u16::try_from(plan.canvas.width)
            .map_err(|_| ReelError::render("canvas width exceeds u16"))?;
        let height = u16::try_from(plan.canvas.height)
            .map_err(|_| ReelError::render("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(ReelError::render("canvas must be non-empty"));
        }

        let data = self.with_ctx_mut(width, height, |this, ctx| {
            for op in &plan.ops {
                match &op.op {
                    DrawOp::FillRect { rect, color } => {
                        if is_empty_rect(rect) {
                            continue;
                        }
                        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            color.r, color.g, color.b, color.a,
                        ));
                        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                            rect.x0, rect.y0, rect.x1, rect.y1,
                        ));
                    }
                    DrawOp::Text(t) => this.draw_text(ctx, t)?,
                }
            }
            ctx.flush();
            let mut pixmap = vello_cpu::Pixmap::new(width, height);
            ctx.render_to_pixmap(&mut pixmap);
            Ok(pixmap.data_as_u8_slice().to_vec())
        })?;

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data,
            premultiplied: true,
        })
    }
}

fn is_empty_rect(r: &Rect) -> bool {
    !(r.width() > 0.0 && r.height() > 0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
