//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

use crate::domain::model::{OutputFormat, QualityTier, SourceDescriptor};

/// Where the video comes from
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// URL of a video yt-dlp can download
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Local video file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

impl SourceArgs {
    /// Build the source descriptor, using `quality` for remote sources
    pub fn descriptor(&self, quality: QualityTier) -> Option<SourceDescriptor> {
        match (&self.url, &self.file) {
            (Some(url), _) => Some(SourceDescriptor::Remote {
                url: url.clone(),
                quality,
            }),
            (None, Some(path)) => Some(SourceDescriptor::Local { path: path.clone() }),
            (None, None) => None,
        }
    }
}

/// Arguments for the run command
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Maximum download height: 360p, 480p, 720p, 1080p, 1440p/2K, 2160p/4K
    #[arg(short, long, requires = "url")]
    pub quality: Option<QualityTier>,

    /// Existing directory the clips are written to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Output container: mp4, mkv, mov or avi
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Keep the downloaded video after cutting
    #[arg(long)]
    pub keep_original: bool,

    /// Directory for the downloaded video (default: the output directory)
    #[arg(long, value_name = "DIR")]
    pub download_dir: Option<PathBuf>,

    /// Clip to cut; may be repeated
    #[arg(short, long = "clip", value_name = "START,END[,NAME]")]
    pub clip: Vec<String>,

    /// TOML ([[clip]] tables) or JSON (array) file of clips
    #[arg(long, value_name = "FILE")]
    pub clips: Option<PathBuf>,

    /// Warn about clips that end after the source does
    #[arg(long)]
    pub check_bounds: bool,

    /// Print the batch report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the probe command
#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the check command
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
