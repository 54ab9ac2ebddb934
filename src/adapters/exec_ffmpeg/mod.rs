//! FFmpeg argument construction
//!
//! Clips are cut with stream copy: no re-encoding, output overwritten.

use std::path::Path;
use std::time::Duration;

use crate::utils::time::TimeParser;

/// Builds ffmpeg command lines
pub struct FfmpegArgs;

impl FfmpegArgs {
    /// Seek to `start`, copy `duration` of every stream into `output`
    pub fn extract(source: &Path, output: &Path, start: Duration, duration: Duration) -> Vec<String> {
        vec![
            "-ss".to_string(),
            TimeParser::format_time(start),
            "-i".to_string(),
            source.to_string_lossy().into_owned(),
            "-t".to_string(),
            TimeParser::format_time(duration),
            "-c:v".to_string(),
            "copy".to_string(),
            "-c:a".to_string(),
            "copy".to_string(),
            output.to_string_lossy().into_owned(),
            "-y".to_string(),
        ]
    }

    /// Version query used by the dependency check
    pub fn version() -> Vec<String> {
        vec!["-version".to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_args() {
        let args = FfmpegArgs::extract(
            Path::new("source.mp4"),
            Path::new("out/intro.mkv"),
            Duration::from_secs(10),
            Duration::from_millis(12_500),
        );
        assert_eq!(
            args,
            vec![
                "-ss",
                "00:00:10.000",
                "-i",
                "source.mp4",
                "-t",
                "00:00:12.500",
                "-c:v",
                "copy",
                "-c:a",
                "copy",
                "out/intro.mkv",
                "-y",
            ]
        );
    }
}
