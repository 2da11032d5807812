/// Convenience result type used across jsonreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// The input declared a content type that is not a JSON type.
    #[error("invalid input type: expected a JSON file, got '{content_type}'")]
    InvalidInputType {
        /// Declared content type of the rejected input.
        content_type: String,
    },

    /// The input text is not valid JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid user-provided options or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while turning frames into an artifact or writing it out.
    #[error("export error: {0}")]
    Export(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::InvalidInputType`] value.
    pub fn invalid_input_type(content_type: impl Into<String>) -> Self {
        Self::InvalidInputType {
            content_type: content_type.into(),
        }
    }

    /// Build a [`ReelError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
