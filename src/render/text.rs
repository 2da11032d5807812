use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{ReelError, ReelResult};

/// Raw font file bytes plus where they came from.
#[derive(Clone)]
pub struct FontSource {
    bytes: Arc<Vec<u8>>,
    origin: String,
}

impl std::fmt::Debug for FontSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSource")
            .field("origin", &self.origin)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl FontSource {
    /// Wrap in-memory font bytes.
    pub fn from_bytes(bytes: Vec<u8>, origin: impl Into<String>) -> Self {
        Self {
            bytes: Arc::new(bytes),
            origin: origin.into(),
        }
    }

    /// Read a TTF/OTF/TTC file.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        if bytes.is_empty() {
            return Err(ReelError::validation(format!(
                "font file '{}' is empty",
                path.display()
            )));
        }
        Ok(Self::from_bytes(bytes, path.display().to_string()))
    }

    /// First sans-serif face installed on the system, falling back to any face.
    pub fn system_sans() -> Option<Self> {
        use usvg::fontdb;

        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let families = [fontdb::Family::SansSerif];
        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight::NORMAL,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|f| f.id))?;
        let origin = db
            .face(id)
            .map(|f| format!("system:{}", f.post_script_name))
            .unwrap_or_else(|| "system".to_owned());
        let bytes = db.with_face_data(id, |data, _index| data.to_vec())?;
        Some(Self::from_bytes(bytes, origin))
    }

    /// Resolve the font to draw text with: an explicit file, else a system face, else none.
    pub fn resolve(explicit: Option<&Path>) -> ReelResult<Option<Self>> {
        if let Some(path) = explicit {
            return Self::from_path(path).map(Some);
        }
        let found = Self::system_sans();
        match &found {
            Some(f) => tracing::debug!(origin = %f.origin, "using system font"),
            None => tracing::warn!("no font file given and no system font found; text is skipped"),
        }
        Ok(found)
    }

    /// Where the bytes came from (a path or `system:<name>`).
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Borrow the raw bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Candidate font path from the CLI or the config file, CLI first.
pub fn pick_font_path(cli: Option<PathBuf>, config: Option<PathBuf>) -> Option<PathBuf> {
    cli.or(config)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

/// Single-line layout and its measured extents.
pub struct LineLayout {
    /// Shaped layout.
    pub layout: parley::Layout<TextBrushRgba8>,
    /// Advance width in pixels.
    pub width: f32,
    /// Distance from the layout top to the first baseline.
    pub baseline: f32,
}

/// Stateful helper for building Parley text layouts from one registered font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font` and remember its primary family.
    pub fn new(font: &FontSource) -> ReelResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ReelError::validation(format!(
                "no font families registered from '{}'",
                font.origin()
            ))
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ReelError::validation("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Primary family name of the registered font.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape one unwrapped line of text.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        bold: bool,
        brush: TextBrushRgba8,
    ) -> ReelResult<LineLayout> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ReelError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        if bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        let mut width = 0.0f32;
        let mut baseline = None;
        for line in layout.lines() {
            let m = line.metrics();
            width = width.max(m.advance);
            baseline.get_or_insert(m.baseline);
        }

        Ok(LineLayout {
            layout,
            width,
            baseline: baseline.unwrap_or(0.0),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
