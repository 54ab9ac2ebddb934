// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Receives tool output and status messages as they are produced
pub trait LineSink: Send + Sync {
    fn line(&self, kind: LineKind, text: &str);
}

impl<F> LineSink for F
where
    F: Fn(LineKind, &str) + Send + Sync,
{
    fn line(&self, kind: LineKind, text: &str) {
        self(kind, text)
    }
}

/// Receives `(completed, total)` after every clip and run state transitions
pub trait ProgressSink: Send + Sync {
    fn on_progress(&self, completed: usize, total: usize);

    fn on_state(&self, _state: RunState) {}
}

impl<F> ProgressSink for F
where
    F: Fn(usize, usize) + Send + Sync,
{
    fn on_progress(&self, completed: usize, total: usize) {
        self(completed, total)
    }
}

/// Sink that discards everything
pub struct NullSink;

impl LineSink for NullSink {
    fn line(&self, _kind: LineKind, _text: &str) {}
}

impl ProgressSink for NullSink {
    fn on_progress(&self, _completed: usize, _total: usize) {}
}

/// Port for running external programs
#[async_trait]
pub trait ProcessPort: Send + Sync {
    /// Run `program` with `args` to completion.
    ///
    /// Every stdout/stderr line is delivered to `sink` while the process
    /// runs. A non-zero exit is returned as an outcome; only a failure to
    /// start the program is an error ([`ClipperError::LaunchFailure`]).
    async fn run(
        &self,
        program: &str,
        args: &[String],
        sink: &dyn LineSink,
    ) -> Result<ProcessOutcome, ClipperError>;
}

/// Port for the few file system operations the orchestration needs
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if a file or directory exists at `path`
    async fn exists(&self, path: &Path) -> Result<bool, ClipperError>;

    /// Check if `path` is an existing directory
    async fn directory_exists(&self, path: &Path) -> Result<bool, ClipperError>;

    /// Delete a file
    async fn delete_file(&self, path: &Path) -> Result<(), ClipperError>;
}
