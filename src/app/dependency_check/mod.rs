// Dependency check - Verifies the external tools can be run

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::adapters::exec_ffmpeg::FfmpegArgs;
use crate::adapters::probe_ffprobe::FfprobeArgs;
use crate::adapters::toml_config::ToolsConfig;
use crate::adapters::ytdlp::YtDlpArgs;
use crate::domain::errors::*;
use crate::ports::*;

/// The external programs clipbatch drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    YtDlp,
    Ffmpeg,
    Ffprobe,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Ffmpeg, Tool::Ffprobe, Tool::YtDlp];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::YtDlp => "yt-dlp",
            Tool::Ffmpeg => "ffmpeg",
            Tool::Ffprobe => "ffprobe",
        }
    }

    fn version_args(&self) -> Vec<String> {
        match self {
            Tool::YtDlp => YtDlpArgs::version(),
            Tool::Ffmpeg => FfmpegArgs::version(),
            Tool::Ffprobe => FfprobeArgs::version(),
        }
    }

    /// Whether `stdout` of the version call looks like this tool
    fn recognizes(&self, stdout: &str) -> bool {
        match self {
            Tool::YtDlp => !stdout.trim().is_empty(),
            Tool::Ffmpeg | Tool::Ffprobe => stdout.contains(&format!("{} version", self.name())),
        }
    }

    fn program<'a>(&self, tools: &'a ToolsConfig) -> &'a str {
        match self {
            Tool::YtDlp => &tools.ytdlp,
            Tool::Ffmpeg => &tools.ffmpeg,
            Tool::Ffprobe => &tools.ffprobe,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Availability of one tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolStatus {
    pub tool: Tool,
    /// Configured program name or path
    pub program: String,
    pub available: bool,
    /// Resolved executable, when found on `PATH`
    pub path: Option<PathBuf>,
    /// First line of the version output
    pub version: Option<String>,
    pub message: String,
}

/// Result of checking every tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyReport {
    pub tools: Vec<ToolStatus>,
}

impl DependencyReport {
    pub fn all_available(&self) -> bool {
        self.tools.iter().all(|t| t.available)
    }

    pub fn status(&self, tool: Tool) -> Option<&ToolStatus> {
        self.tools.iter().find(|t| t.tool == tool)
    }
}

/// Locates and runs each tool's version command
pub struct DependencyChecker {
    process_port: Arc<dyn ProcessPort>,
    tools: ToolsConfig,
}

impl DependencyChecker {
    pub fn new(process_port: Arc<dyn ProcessPort>, tools: ToolsConfig) -> Self {
        Self {
            process_port,
            tools,
        }
    }

    pub async fn check_all(&self, lines: &dyn LineSink) -> DependencyReport {
        let mut tools = Vec::with_capacity(Tool::ALL.len());
        for tool in Tool::ALL {
            tools.push(self.check(tool, lines).await);
        }
        DependencyReport { tools }
    }

    pub async fn check(&self, tool: Tool, lines: &dyn LineSink) -> ToolStatus {
        let program = tool.program(&self.tools).to_string();
        let path = which::which(&program).ok();
        debug!(%tool, program = %program, path = ?path, "Checking tool");

        let outcome = match self
            .process_port
            .run(&program, &tool.version_args(), lines)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(%tool, "{}", e);
                let message = match e {
                    ClipperError::LaunchFailure { .. } if path.is_none() => {
                        format!("{} not found; is it installed and in PATH?", program)
                    }
                    other => other.to_string(),
                };
                return ToolStatus {
                    tool,
                    program,
                    available: false,
                    path,
                    version: None,
                    message,
                };
            }
        };

        let version = outcome
            .stdout
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string);

        let (available, message) = if !outcome.success() {
            (false, format!("{} exited with code {}", program, outcome.exit_code))
        } else if !tool.recognizes(&outcome.stdout) {
            (false, format!("{} did not report a {} version", program, tool))
        } else {
            (true, "OK".to_string())
        };

        if !available {
            warn!(%tool, "{}", message);
        }

        ToolStatus {
            tool,
            program,
            available,
            path,
            version,
            message,
        }
    }
}
