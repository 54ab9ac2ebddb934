// Tracing log adapter - Routes tool output and progress through tracing

use tracing::{debug, info};

use crate::domain::model::*;
use crate::ports::*;
use crate::utils::logging::TOOL_TARGET;

/// Line sink that emits every line as a tracing event.
///
/// Tool output goes to `debug` under the `clipbatch::tool` target so it can
/// be enabled on its own; status lines go to `info`.
#[derive(Debug, Default, Clone)]
pub struct TracingLogAdapter;

impl TracingLogAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl LineSink for TracingLogAdapter {
    fn line(&self, kind: LineKind, text: &str) {
        match kind {
            LineKind::Stdout => debug!(target: TOOL_TARGET, stream = "stdout", "{}", text),
            LineKind::Stderr => debug!(target: TOOL_TARGET, stream = "stderr", "{}", text),
            LineKind::Status => info!("{}", text),
        }
    }
}

impl ProgressSink for TracingLogAdapter {
    fn on_progress(&self, completed: usize, total: usize) {
        info!(completed, total, "Progress: {}/{} clips", completed, total);
    }

    fn on_state(&self, state: RunState) {
        debug!(%state, "Run state changed");
    }
}
