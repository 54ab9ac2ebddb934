// Clip executor - Runs the transcoder once per plan entry

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::adapters::exec_ffmpeg::FfmpegArgs;
use crate::adapters::toml_config::ToolsConfig;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::path::PathUtils;
use crate::utils::time::TimeParser;

/// Everything the executor needs to cut one batch
#[derive(Debug, Clone, Copy)]
pub struct ExecutionJob<'a> {
    pub plan: &'a ClipPlan,
    pub source: &'a ResolvedSource,
    pub output_dir: &'a Path,
    pub format: OutputFormat,
    pub keep_original: bool,
}

/// What the executor did
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// One result per plan entry, in plan order
    pub results: Vec<ClipResult>,
    pub cancelled: bool,
    pub source_removed: bool,
}

/// Sequential stream-copy extraction
pub struct ClipExecutor {
    process_port: Arc<dyn ProcessPort>,
    fs_port: Arc<dyn FsPort>,
    tools: ToolsConfig,
}

impl ClipExecutor {
    pub fn new(process_port: Arc<dyn ProcessPort>, fs_port: Arc<dyn FsPort>, tools: ToolsConfig) -> Self {
        Self {
            process_port,
            fs_port,
            tools,
        }
    }

    /// Extract every entry of `job.plan` from the source.
    ///
    /// A failing clip is recorded and the batch moves on. The token is
    /// only looked at between clips; once it fires, the remaining entries
    /// are recorded as skipped. The temporary source is removed at the
    /// end unless `keep_original` is set, including when the transcoder
    /// cannot be launched and the batch aborts.
    pub async fn execute(
        &self,
        job: ExecutionJob<'_>,
        progress: &dyn ProgressSink,
        lines: &dyn LineSink,
        cancel: &CancellationToken,
    ) -> Result<ExecutionSummary, ClipperError> {
        if !self.fs_port.directory_exists(job.output_dir).await? {
            return Err(ClipperError::OutputDirNotFound {
                path: job.output_dir.to_path_buf(),
            });
        }

        let total = job.plan.len();
        let mut results = Vec::with_capacity(total);
        let mut cancelled = false;

        for (index, entry) in job.plan.iter().enumerate() {
            let destination =
                PathUtils::clip_destination(job.output_dir, entry.name(), job.format.extension());

            if cancelled || cancel.is_cancelled() {
                if !cancelled {
                    warn!(remaining = total - index, "Run cancelled, skipping remaining clips");
                    lines.line(LineKind::Status, "Cancelled: remaining clips skipped");
                    cancelled = true;
                }
                results.push(ClipResult::skipped(entry.clone(), destination));
                continue;
            }

            progress.on_state(RunState::Executing {
                index: index + 1,
                total,
            });
            info!(
                clip = entry.name(),
                start = %TimeParser::format_time(entry.start()),
                end = %TimeParser::format_time(entry.end()),
                "Extracting clip {} of {}",
                index + 1,
                total
            );

            let args = FfmpegArgs::extract(
                &job.source.path,
                &destination,
                entry.start(),
                entry.duration(),
            );
            let outcome = match self.process_port.run(&self.tools.ffmpeg, &args, lines).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Transcoder unavailable, aborting batch: {}", e);
                    progress.on_state(RunState::Cleaning);
                    cleanup_source(self.fs_port.as_ref(), job.source, job.keep_original, lines)
                        .await;
                    return Err(e);
                }
            };

            if outcome.success() {
                info!(clip = entry.name(), "Wrote {}", destination.display());
                results.push(ClipResult::succeeded(entry.clone(), destination));
            } else {
                let failure = ClipperError::ExtractionFailure {
                    name: entry.name().to_string(),
                    exit_code: outcome.exit_code,
                    stderr: outcome.stderr.trim().to_string(),
                };
                error!(clip = entry.name(), exit_code = outcome.exit_code, "Clip failed");
                lines.line(LineKind::Status, &format!("ERROR: {}", failure));
                results.push(ClipResult::failed(entry.clone(), destination, &failure));
            }

            progress.on_progress(results.len(), total);
        }

        progress.on_state(RunState::Cleaning);
        let source_removed =
            cleanup_source(self.fs_port.as_ref(), job.source, job.keep_original, lines).await;

        Ok(ExecutionSummary {
            results,
            cancelled,
            source_removed,
        })
    }
}

/// Delete a temporary source unless it is to be kept.
///
/// Returns whether a file was removed. Failures are logged and reported
/// as a status line, never returned.
pub async fn cleanup_source(
    fs_port: &dyn FsPort,
    source: &ResolvedSource,
    keep_original: bool,
    lines: &dyn LineSink,
) -> bool {
    if !source.is_temporary || keep_original {
        return false;
    }

    match fs_port.exists(&source.path).await {
        Ok(true) => {}
        Ok(false) => return false,
        Err(e) => {
            warn!("Could not check temporary download: {}", e);
            return false;
        }
    }

    match fs_port.delete_file(&source.path).await {
        Ok(()) => {
            info!("Removed temporary download {}", source.path.display());
            lines.line(
                LineKind::Status,
                &format!("Removed temporary download {}", source.path.display()),
            );
            true
        }
        Err(e) => {
            warn!("Failed to remove temporary download: {}", e);
            lines.line(
                LineKind::Status,
                &format!(
                    "Warning: could not remove temporary download {}: {}",
                    source.path.display(),
                    e
                ),
            );
            false
        }
    }
}
