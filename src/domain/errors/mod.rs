// Domain errors - Error types for the domain layer

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while planning, acquiring or executing a clip batch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClipperError {
    /// External binary could not be started
    #[error("Failed to launch {program}: {message}")]
    LaunchFailure { program: String, message: String },

    /// Start or end time of a row is unparseable, or end <= start
    #[error("Row {row}: invalid time range: {message}")]
    InvalidTime { row: usize, message: String },

    /// Clip name cannot be used as a file name
    #[error("Row {row}: invalid clip name '{name}': {message}")]
    InvalidName {
        row: usize,
        name: String,
        message: String,
    },

    /// Two rows share a name
    #[error("Duplicate clip name '{name}' in rows {first_row} and {repeat_row}")]
    DuplicateName {
        name: String,
        first_row: usize,
        repeat_row: usize,
    },

    /// No clip rows were given
    #[error("Clip list is empty: add at least one clip")]
    EmptyPlan,

    /// Local source does not exist
    #[error("Source file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// Downloader failed or produced no file
    #[error("Download of {url} failed (exit code {exit_code}): {stderr}")]
    DownloadFailure {
        url: String,
        exit_code: i32,
        stderr: String,
    },

    /// Output directory does not exist
    #[error("Output directory not found: {}", path.display())]
    OutputDirNotFound { path: PathBuf },

    /// Transcoder failed for a single clip
    #[error("Extraction of clip '{name}' failed (exit code {exit_code}): {stderr}")]
    ExtractionFailure {
        name: String,
        exit_code: i32,
        stderr: String,
    },

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or pipe error
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ClipperError {
    fn from(err: std::io::Error) -> Self {
        ClipperError::Io(err.to_string())
    }
}

/// Result type alias for clipper operations
pub type ClipperResult<T> = std::result::Result<T, ClipperError>;
