// Duration probe - Asks yt-dlp or ffprobe how long a video is

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::adapters::probe_ffprobe::FfprobeArgs;
use crate::adapters::toml_config::ToolsConfig;
use crate::adapters::ytdlp::YtDlpArgs;
use crate::domain::errors::*;
use crate::ports::*;
use crate::utils::time::TimeParser;

/// Reports source durations.
///
/// `Ok(None)` means the tool ran but gave no usable answer (non-zero exit,
/// blank or unparseable output); only a tool that cannot be started is an
/// error.
pub struct DurationProbe {
    process_port: Arc<dyn ProcessPort>,
    tools: ToolsConfig,
}

impl DurationProbe {
    pub fn new(process_port: Arc<dyn ProcessPort>, tools: ToolsConfig) -> Self {
        Self {
            process_port,
            tools,
        }
    }

    /// Duration of a remote video, without downloading it
    pub async fn probe_remote(
        &self,
        url: &str,
        lines: &dyn LineSink,
    ) -> Result<Option<Duration>, ClipperError> {
        self.probe(&self.tools.ytdlp, YtDlpArgs::duration(url), lines)
            .await
    }

    /// Duration of a local file
    pub async fn probe_local(
        &self,
        path: &Path,
        lines: &dyn LineSink,
    ) -> Result<Option<Duration>, ClipperError> {
        self.probe(&self.tools.ffprobe, FfprobeArgs::duration(path), lines)
            .await
    }

    async fn probe(
        &self,
        program: &str,
        args: Vec<String>,
        lines: &dyn LineSink,
    ) -> Result<Option<Duration>, ClipperError> {
        let outcome = self.process_port.run(program, &args, lines).await?;

        if !outcome.success() {
            warn!(
                program,
                exit_code = outcome.exit_code,
                stderr = %outcome.stderr.trim(),
                "Duration probe failed"
            );
            return Ok(None);
        }

        match TimeParser::parse_seconds(&outcome.stdout) {
            Some(duration) => {
                debug!(program, seconds = duration.as_secs_f64(), "Probed duration");
                Ok(Some(duration))
            }
            None => {
                warn!(
                    program,
                    stdout = %outcome.stdout.trim(),
                    stderr = %outcome.stderr.trim(),
                    "Duration probe returned no usable value"
                );
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock_process::{MockProcessRunner, ScriptedResponse};

    fn probe_with(runner: &Arc<MockProcessRunner>) -> DurationProbe {
        DurationProbe::new(runner.clone(), ToolsConfig::default())
    }

    #[tokio::test]
    async fn test_probe_remote_parses_seconds() {
        let runner = Arc::new(MockProcessRunner::new());
        runner.push("yt-dlp", ScriptedResponse::success("212.5\n"));

        let duration = probe_with(&runner)
            .probe_remote("https://example.com/v", &NullSink)
            .await
            .unwrap();

        assert_eq!(duration, Some(Duration::from_millis(212_500)));
        let calls = runner.calls_to("yt-dlp");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args, vec!["--print", "duration", "--", "https://example.com/v"]);
    }

    #[tokio::test]
    async fn test_probe_local_uses_ffprobe() {
        let runner = Arc::new(MockProcessRunner::new());
        runner.push("ffprobe", ScriptedResponse::success("5025.2\n"));

        let duration = probe_with(&runner)
            .probe_local(Path::new("talk.mp4"), &NullSink)
            .await
            .unwrap();

        assert_eq!(duration, Some(Duration::from_secs_f64(5025.2)));
        assert_eq!(runner.calls_to("ffprobe")[0].args.last().unwrap(), "talk.mp4");
    }

    #[tokio::test]
    async fn test_absent_on_failure_or_garbage() {
        let runner = Arc::new(MockProcessRunner::new());
        runner
            .push("ffprobe", ScriptedResponse::exit(1, "No such file"))
            .push("ffprobe", ScriptedResponse::success("\n"))
            .push("ffprobe", ScriptedResponse::success("N/A\n"))
            .push("ffprobe", ScriptedResponse::success("-3.0\n"))
            .push("ffprobe", ScriptedResponse::success("\n12.0\n"));
        let probe = probe_with(&runner);

        for _ in 0..5 {
            let duration = probe
                .probe_local(Path::new("x.mp4"), &NullSink)
                .await
                .unwrap();
            assert_eq!(duration, None);
        }
    }

    #[tokio::test]
    async fn test_launch_failure_propagates() {
        let runner = Arc::new(MockProcessRunner::new());
        runner.push("yt-dlp", ScriptedResponse::launch_failure("not installed"));

        let err = probe_with(&runner)
            .probe_remote("https://example.com/v", &NullSink)
            .await
            .unwrap_err();
        assert!(matches!(err, ClipperError::LaunchFailure { .. }));
    }
}
