//! FFprobe argument construction

use std::path::Path;

/// Builds ffprobe command lines
pub struct FfprobeArgs;

impl FfprobeArgs {
    /// Print `format.duration` as a bare number
    pub fn duration(path: &Path) -> Vec<String> {
        vec![
            "-v".to_string(),
            "error".to_string(),
            "-show_entries".to_string(),
            "format=duration".to_string(),
            "-of".to_string(),
            "default=noprint_wrappers=1:nokey=1".to_string(),
            path.to_string_lossy().into_owned(),
        ]
    }

    pub fn version() -> Vec<String> {
        vec!["-version".to_string()]
    }
}
