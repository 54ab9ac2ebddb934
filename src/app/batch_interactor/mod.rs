// Batch interactor - Orchestrates the clip batch use case

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::adapters::toml_config::ToolsConfig;
use crate::app::clip_executor::{cleanup_source, ClipExecutor, ExecutionJob};
use crate::app::duration_probe::DurationProbe;
use crate::app::source_acquirer::SourceAcquirer;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;
use crate::utils::time::TimeParser;

/// Input of one batch run
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub clips: Vec<ClipRequest>,
    pub source: SourceDescriptor,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub keep_original: bool,
    /// Download location for remote sources; `output_dir` when `None`
    pub download_dir: Option<PathBuf>,
    /// Warn about clips that end past the source duration
    pub check_bounds: bool,
}

impl BatchRequest {
    pub fn new(clips: Vec<ClipRequest>, source: SourceDescriptor, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            clips,
            source,
            output_dir: output_dir.into(),
            format: OutputFormat::default(),
            keep_original: false,
            download_dir: None,
            check_bounds: false,
        }
    }
}

/// Interactor for the clip batch use case
pub struct BatchInteractor {
    fs_port: Arc<dyn FsPort>,
    source_acquirer: SourceAcquirer,
    clip_executor: ClipExecutor,
    duration_probe: DurationProbe,
}

impl BatchInteractor {
    /// Create new batch interactor with injected ports
    pub fn new(process_port: Arc<dyn ProcessPort>, fs_port: Arc<dyn FsPort>, tools: ToolsConfig) -> Self {
        Self {
            source_acquirer: SourceAcquirer::new(
                Arc::clone(&process_port),
                Arc::clone(&fs_port),
                tools.clone(),
            ),
            clip_executor: ClipExecutor::new(
                Arc::clone(&process_port),
                Arc::clone(&fs_port),
                tools.clone(),
            ),
            duration_probe: DurationProbe::new(process_port, tools),
            fs_port,
        }
    }

    /// Validate, acquire the source, cut every clip and clean up.
    ///
    /// Validation and acquisition errors end the run before any clip is
    /// cut; per-clip failures only show up in the returned report.
    pub async fn run(
        &self,
        request: &BatchRequest,
        progress: &dyn ProgressSink,
        lines: &dyn LineSink,
        cancel: &CancellationToken,
    ) -> Result<BatchReport, ClipperError> {
        let started_at = Utc::now();

        progress.on_state(RunState::Validating);
        let plan = ClipPlanValidator::validate(&request.clips)
            .map_err(|e| Self::fail(progress, e))?;
        info!(clips = plan.len(), "Clip plan validated");

        // Checked before acquisition so nothing is downloaded into a missing folder
        let output_dir_exists = self
            .fs_port
            .directory_exists(&request.output_dir)
            .await
            .map_err(|e| Self::fail(progress, e))?;
        if !output_dir_exists {
            return Err(Self::fail(
                progress,
                ClipperError::OutputDirNotFound {
                    path: request.output_dir.clone(),
                },
            ));
        }

        progress.on_state(RunState::AcquiringSource);
        let download_dir = request
            .download_dir
            .as_deref()
            .unwrap_or(&request.output_dir);
        let source = self
            .source_acquirer
            .resolve(&request.source, download_dir, lines)
            .await
            .map_err(|e| Self::fail(progress, e))?;

        if request.check_bounds {
            self.check_bounds(&plan, &source, lines).await;
        }

        let job = ExecutionJob {
            plan: &plan,
            source: &source,
            output_dir: &request.output_dir,
            format: request.format,
            keep_original: request.keep_original,
        };
        let summary = match self.clip_executor.execute(job, progress, lines, cancel).await {
            Ok(summary) => summary,
            Err(e) => {
                cleanup_source(self.fs_port.as_ref(), &source, request.keep_original, lines).await;
                return Err(Self::fail(progress, e));
            }
        };

        let report = BatchReport {
            results: summary.results,
            source,
            source_removed: summary.source_removed,
            cancelled: summary.cancelled,
            started_at,
            finished_at: Utc::now(),
        };

        progress.on_state(RunState::Done);
        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "{}",
            report.summary()
        );
        lines.line(LineKind::Status, &report.summary());

        Ok(report)
    }

    /// Warn about clips ending past the end of the source. Never fatal.
    async fn check_bounds(&self, plan: &ClipPlan, source: &ResolvedSource, lines: &dyn LineSink) {
        let duration = match self.duration_probe.probe_local(&source.path, lines).await {
            Ok(Some(duration)) => duration,
            Ok(None) => {
                warn!("Could not determine source duration, skipping bounds check");
                return;
            }
            Err(e) => {
                warn!("Bounds check skipped: {}", e);
                return;
            }
        };

        for entry in plan.iter().filter(|e| e.end() > duration) {
            let message = format!(
                "Warning: clip '{}' ends at {} but the source is only {} long",
                entry.name(),
                TimeParser::format_time(entry.end()),
                TimeParser::format_time(duration)
            );
            warn!(clip = entry.name(), row = entry.row(), "{}", message);
            lines.line(LineKind::Status, &message);
        }
    }

    fn fail(progress: &dyn ProgressSink, e: ClipperError) -> ClipperError {
        error!("Batch failed: {}", e);
        progress.on_state(RunState::Failed);
        e
    }
}
