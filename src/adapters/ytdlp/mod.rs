//! yt-dlp argument construction

use std::path::Path;

use crate::domain::model::QualityTier;

/// Container the downloader merges video and audio into
pub const DOWNLOAD_CONTAINER: &str = "mp4";

/// Builds yt-dlp command lines
pub struct YtDlpArgs;

impl YtDlpArgs {
    /// Metadata-only call printing the duration in seconds
    pub fn duration(url: &str) -> Vec<String> {
        vec![
            "--print".to_string(),
            "duration".to_string(),
            "--".to_string(),
            url.to_string(),
        ]
    }

    /// Best video no taller than the tier, merged with best audio
    pub fn format_selector(quality: QualityTier) -> String {
        format!("bv[height<={}]+ba/best", quality.max_height())
    }

    /// Download `url` into `output`
    pub fn download(url: &str, quality: QualityTier, output: &Path) -> Vec<String> {
        vec![
            "-f".to_string(),
            Self::format_selector(quality),
            "--merge-output-format".to_string(),
            DOWNLOAD_CONTAINER.to_string(),
            "-o".to_string(),
            output.to_string_lossy().into_owned(),
            "--".to_string(),
            url.to_string(),
        ]
    }

    /// Version query used by the dependency check
    pub fn version() -> Vec<String> {
        vec!["--version".to_string()]
    }
}
