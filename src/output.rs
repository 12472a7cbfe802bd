//! Temporary artifact storage.
//!
//! Rendered documents are written here, read back by the request handler and
//! deleted. The directory is created once at startup by [`OutputDir::init`].

use crate::error::{DocsError, DocsResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    /// Ensure `path` exists, creating it and any parents.
    pub fn init(path: impl Into<PathBuf>) -> DocsResult<Self> {
        let path = path.into();
        if path.is_dir() {
            info!(path = %path.display(), "Output directory already exists");
        } else {
            std::fs::create_dir_all(&path).map_err(|e| DocsError::io(&e, &path))?;
            info!(path = %path.display(), "Output directory created");
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unique file name for a new document.
    pub fn artifact_name() -> String {
        format!(
            "db_docs_{}_{}.docx",
            chrono::Utc::now().timestamp_millis(),
            uuid::Uuid::new_v4().simple()
        )
    }

    /// Write `bytes` to a fresh file and return its path.
    pub async fn write_artifact(&self, bytes: &[u8]) -> DocsResult<PathBuf> {
        let path = self.path.join(Self::artifact_name());
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| DocsError::io(&e, &path))?;
        Ok(path)
    }

    /// Read an artifact and delete it, whether or not the read succeeded.
    /// A failed delete is logged only.
    pub async fn take_artifact(&self, path: &Path) -> DocsResult<Vec<u8>> {
        let read = tokio::fs::read(path)
            .await
            .map_err(|e| DocsError::io(&e, path));
        remove_artifact(path).await;
        read
    }
}

async fn remove_artifact(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove artifact"),
    }
}
