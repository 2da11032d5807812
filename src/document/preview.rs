use crate::document::model::{Document, integral_numbers};

/// Two-space indented JSON text of the document.
///
/// Pure: the same document always yields the same text, in source key order. Integral floats
/// print without a fraction (`1.0` -> `1`).
pub fn render_preview(doc: &Document) -> String {
    // Serializing a `Value` cannot fail.
    serde_json::to_string_pretty(&integral_numbers(doc.value())).unwrap_or_default()
}

/// The preview split into display lines.
pub fn preview_lines(doc: &Document) -> Vec<String> {
    render_preview(doc).lines().map(str::to_owned).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/document/preview.rs"]
mod tests;
