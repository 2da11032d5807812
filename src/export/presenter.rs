use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::export::artifact::Artifact;
use crate::foundation::error::{ReelError, ReelResult};

/// Where an artifact ended up and how to describe it to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresentedArtifact {
    /// Written file.
    pub path: PathBuf,
    /// Declared media type.
    pub content_type: &'static str,
    /// Size in bytes.
    pub size: u64,
}

/// Write `artifact` into `out_dir` under its generated name.
///
/// Creates `out_dir` if needed and never replaces an existing file.
pub fn present_artifact(artifact: &Artifact, out_dir: &Path) -> ReelResult<PresentedArtifact> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    let path = out_dir.join(artifact.file_name());
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| ReelError::export(format!("create '{}': {e}", path.display())))?;
    file.write_all(&artifact.bytes)
        .with_context(|| format!("write artifact '{}'", path.display()))?;

    tracing::info!(path = %path.display(), bytes = artifact.bytes.len(), "artifact written");
    Ok(PresentedArtifact {
        path,
        content_type: artifact.content_type(),
        size: artifact.bytes.len() as u64,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/export/presenter.rs"]
mod tests;
