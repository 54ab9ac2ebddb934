// Filesystem adapter - File system operations through tokio::fs

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::ports::*;

/// Filesystem adapter over the local disk
#[derive(Debug, Default, Clone)]
pub struct StdFsAdapter;

impl StdFsAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for StdFsAdapter {
    async fn exists(&self, path: &Path) -> Result<bool, ClipperError> {
        match tokio::fs::metadata(path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ClipperError::Io(format!(
                "Failed to inspect {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn directory_exists(&self, path: &Path) -> Result<bool, ClipperError> {
        match tokio::fs::metadata(path).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ClipperError::Io(format!(
                "Failed to inspect {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn delete_file(&self, path: &Path) -> Result<(), ClipperError> {
        tokio::fs::remove_file(path).await.map_err(|e| {
            ClipperError::Io(format!("Failed to delete {}: {}", path.display(), e))
        })
    }
}
