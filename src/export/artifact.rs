use crate::encode::png::encode_png;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::FrameRGBA;

/// Prefix of every generated artifact file name.
pub const ARTIFACT_PREFIX: &str = "json-video";

/// Encoded form of an exported artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Single still image.
    Png,
}

impl ArtifactKind {
    /// Declared media type.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
        }
    }

    /// File name extension, consistent with the media type.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
        }
    }
}

/// The exported binary plus the metadata needed to offer it for download.
#[derive(Clone, Debug, PartialEq)]
pub struct Artifact {
    /// Encoded bytes.
    pub bytes: Vec<u8>,
    /// Encoding.
    pub kind: ArtifactKind,
    /// Creation time in Unix milliseconds; part of the file name.
    pub created_at_ms: i64,
}

impl Artifact {
    /// Encode `frame` as a PNG artifact stamped with `created_at_ms`.
    pub fn from_frame(frame: &FrameRGBA, created_at_ms: i64) -> ReelResult<Self> {
        Ok(Self {
            bytes: encode_png(frame)?,
            kind: ArtifactKind::Png,
            created_at_ms,
        })
    }

    /// Declared media type.
    pub fn content_type(&self) -> &'static str {
        self.kind.content_type()
    }

    /// `json-video-<millis>.<ext>`.
    pub fn file_name(&self) -> String {
        artifact_file_name(self.created_at_ms, self.kind)
    }
}

/// `json-video-<millis>.<ext>`.
pub fn artifact_file_name(created_at_ms: i64, kind: ArtifactKind) -> String {
    format!("{ARTIFACT_PREFIX}-{created_at_ms}.{}", kind.extension())
}

/// Current Unix time in milliseconds.
pub fn now_unix_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Collapse a frame sequence into one artifact. Only the final frame is kept.
pub fn export_artifact(frames: &[FrameRGBA]) -> ReelResult<Artifact> {
    let last = frames
        .last()
        .ok_or_else(|| ReelError::export("no frames were produced"))?;
    Artifact::from_frame(last, now_unix_millis())
}

#[cfg(test)]
#[path = "../../tests/unit/export/artifact.rs"]
mod tests;
