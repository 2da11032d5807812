//! Display options and application configuration.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::color::Rgba8;
use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{ReelError, ReelResult};

/// User-chosen look of an export run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Animation length in whole seconds.
    pub duration_secs: u32,
    /// Surface fill color.
    pub background: Rgba8,
    /// Color of every text line.
    pub text_color: Rgba8,
    /// Base font size in pixels; the title uses 1.5x, the time label 0.8x.
    pub font_size_px: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            duration_secs: 5,
            background: Rgba8::rgb(0x1e, 0x1e, 0x2e),
            text_color: Rgba8::WHITE,
            font_size_px: 32,
        }
    }
}

impl DisplayOptions {
    /// Reject a zero duration or font size.
    pub fn validate(&self) -> ReelResult<()> {
        if self.duration_secs == 0 {
            return Err(ReelError::validation("duration must be a positive number of seconds"));
        }
        if self.font_size_px == 0 {
            return Err(ReelError::validation("font size must be a positive number of pixels"));
        }
        Ok(())
    }

    /// Frame rate used for every export.
    pub fn fps(&self) -> Fps {
        Fps::FIXED
    }

    /// Surface every frame is drawn on.
    pub fn canvas(&self) -> Canvas {
        Canvas::HD
    }

    /// Frames produced for this duration.
    pub fn total_frames(&self) -> u64 {
        self.fps().frames_for_secs(self.duration_secs)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "jsonreel=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

/// File-backed configuration; every field is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReelConfig {
    /// Default display options.
    pub display: DisplayOptions,
    /// Font file used for all text.
    pub font: Option<PathBuf>,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl ReelConfig {
    /// Read a JSON config file.
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        serde_json::from_str(&text).map_err(|e| {
            ReelError::validation(format!("parse config '{}': {e}", path.display()))
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
