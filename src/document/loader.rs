use std::fmt;
use std::path::Path;

use anyhow::Context as _;

use crate::document::model::Document;
use crate::foundation::error::{ReelError, ReelResult};

/// Declared content type of an input.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentType(String);

impl ContentType {
    /// `application/json`.
    pub fn json() -> Self {
        Self("application/json".to_owned())
    }

    /// Wrap an explicit media type, normalized to lowercase without parameters.
    pub fn new(media_type: &str) -> Self {
        let essence = media_type.split(';').next().unwrap_or_default();
        Self(essence.trim().to_ascii_lowercase())
    }

    /// Guess the content type from a file extension.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let media = match ext.as_deref() {
            Some("json") => "application/json",
            Some("geojson") => "application/geo+json",
            Some("jsonld") => "application/ld+json",
            Some("txt") => "text/plain",
            Some("png") => "image/png",
            Some("csv") => "text/csv",
            _ => "application/octet-stream",
        };
        Self(media.to_owned())
    }

    /// Media type string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` for `application/json`, `text/json` and `application/*+json`.
    pub fn is_json(&self) -> bool {
        match self.0.as_str() {
            "application/json" | "text/json" => true,
            other => other
                .strip_prefix("application/")
                .is_some_and(|sub| sub.ends_with("+json") && sub.len() > "+json".len()),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reject inputs whose declared type is not JSON.
pub fn ensure_json(content_type: &ContentType) -> ReelResult<()> {
    if content_type.is_json() {
        Ok(())
    } else {
        Err(ReelError::invalid_input_type(content_type.as_str()))
    }
}

/// Validate the declared type, then parse `text`.
pub fn load_str(text: &str, content_type: &ContentType) -> ReelResult<Document> {
    ensure_json(content_type)?;
    Document::parse(text)
}

/// Load a document from disk.
///
/// The declared type is taken from `content_type` when given, otherwise guessed from the file
/// extension. The type check happens before any bytes are read. Invalid UTF-8 sequences are
/// decoded as U+FFFD before parsing.
pub fn load_path(path: &Path, content_type: Option<&ContentType>) -> ReelResult<Document> {
    let declared = content_type
        .cloned()
        .unwrap_or_else(|| ContentType::from_path(path));
    ensure_json(&declared)?;

    let bytes =
        std::fs::read(path).with_context(|| format!("read document '{}'", path.display()))?;
    Document::parse(&String::from_utf8_lossy(&bytes))
}

#[cfg(test)]
#[path = "../../tests/unit/document/loader.rs"]
mod tests;
