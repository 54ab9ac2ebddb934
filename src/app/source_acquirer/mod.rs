// Source acquirer - Turns a source descriptor into a local file

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info};
use uuid::Uuid;

use crate::adapters::toml_config::ToolsConfig;
use crate::adapters::ytdlp::{YtDlpArgs, DOWNLOAD_CONTAINER};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

const DOWNLOAD_PREFIX: &str = "original_download_";

/// Resolves local paths and downloads remote videos
pub struct SourceAcquirer {
    process_port: Arc<dyn ProcessPort>,
    fs_port: Arc<dyn FsPort>,
    tools: ToolsConfig,
}

impl SourceAcquirer {
    pub fn new(process_port: Arc<dyn ProcessPort>, fs_port: Arc<dyn FsPort>, tools: ToolsConfig) -> Self {
        Self {
            process_port,
            fs_port,
            tools,
        }
    }

    /// Resolve `descriptor` to a file on disk.
    ///
    /// Remote sources are downloaded into `download_dir` under a fresh
    /// name and come back marked temporary. Local sources are returned
    /// as given and are never temporary.
    pub async fn resolve(
        &self,
        descriptor: &SourceDescriptor,
        download_dir: &Path,
        lines: &dyn LineSink,
    ) -> Result<ResolvedSource, ClipperError> {
        match descriptor {
            SourceDescriptor::Local { path } => {
                if !self.fs_port.exists(path).await? {
                    return Err(ClipperError::SourceNotFound { path: path.clone() });
                }
                info!("Using local source {}", path.display());
                Ok(ResolvedSource::local(path.clone()))
            }
            SourceDescriptor::Remote { url, quality } => {
                self.download(url, *quality, download_dir, lines).await
            }
        }
    }

    async fn download(
        &self,
        url: &str,
        quality: QualityTier,
        download_dir: &Path,
        lines: &dyn LineSink,
    ) -> Result<ResolvedSource, ClipperError> {
        let target = Self::temporary_path(download_dir);
        info!(%quality, "Downloading {} to {}", url, target.display());

        let args = YtDlpArgs::download(url, quality, &target);
        let outcome = self.process_port.run(&self.tools.ytdlp, &args, lines).await?;

        if !outcome.success() {
            error!(exit_code = outcome.exit_code, "Download failed");
            return Err(ClipperError::DownloadFailure {
                url: url.to_string(),
                exit_code: outcome.exit_code,
                stderr: outcome.stderr.trim().to_string(),
            });
        }

        if !self.fs_port.exists(&target).await? {
            error!("Downloader exited cleanly but {} is missing", target.display());
            return Err(ClipperError::DownloadFailure {
                url: url.to_string(),
                exit_code: outcome.exit_code,
                stderr: format!("downloaded file not found at {}", target.display()),
            });
        }

        Ok(ResolvedSource::temporary(target))
    }

    /// `<dir>/original_download_<uuid>.mp4`
    pub fn temporary_path(download_dir: &Path) -> PathBuf {
        download_dir.join(format!(
            "{}{}.{}",
            DOWNLOAD_PREFIX,
            Uuid::new_v4().simple(),
            DOWNLOAD_CONTAINER
        ))
    }
}
