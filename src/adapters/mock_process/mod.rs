//! Scripted process adapter
//!
//! Stands in for yt-dlp/ffmpeg/ffprobe in orchestration tests: records every
//! invocation and answers from a per-program script.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::adapters::process_tokio::TokioProcessRunner;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// One recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Argument following `flag`, if any
    pub fn arg_after(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

/// Scripted answer to one call
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    result: Result<ProcessOutcome, String>,
    creates_file_after: Option<String>,
}

impl ScriptedResponse {
    /// Exit 0 with the given stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            result: Ok(ProcessOutcome::new(0, stdout, "")),
            creates_file_after: None,
        }
    }

    /// Exit with `code` and the given stderr
    pub fn exit(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            result: Ok(ProcessOutcome::new(code, "", stderr)),
            creates_file_after: None,
        }
    }

    /// The program cannot be started
    pub fn launch_failure(message: impl Into<String>) -> Self {
        Self {
            result: Err(message.into()),
            creates_file_after: None,
        }
    }

    /// Create an empty file at the argument following `flag`, as a real
    /// tool writing its output would
    pub fn creating_file_after(mut self, flag: impl Into<String>) -> Self {
        self.creates_file_after = Some(flag.into());
        self
    }
}

/// Process port implementation driven by scripted responses.
///
/// Programs without a queued response fall back to their default response,
/// or to a silent success.
#[derive(Debug, Default)]
pub struct MockProcessRunner {
    queued: Mutex<HashMap<String, VecDeque<ScriptedResponse>>>,
    defaults: Mutex<HashMap<String, ScriptedResponse>>,
    invocations: Mutex<Vec<Invocation>>,
}

impl MockProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for the next unanswered call to `program`
    pub fn push(&self, program: &str, response: ScriptedResponse) -> &Self {
        self.queued
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .entry(program.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Response used for `program` once its queue is empty
    pub fn set_default(&self, program: &str, response: ScriptedResponse) -> &Self {
        self.defaults
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(program.to_string(), response);
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Recorded calls to `program`, in order
    pub fn calls_to(&self, program: &str) -> Vec<Invocation> {
        self.invocations()
            .into_iter()
            .filter(|i| i.program == program)
            .collect()
    }

    fn next_response(&self, program: &str) -> ScriptedResponse {
        let queued = self
            .queued
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get_mut(program)
            .and_then(VecDeque::pop_front);
        queued.unwrap_or_else(|| {
            self.defaults
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .get(program)
                .cloned()
                .unwrap_or_else(|| ScriptedResponse::success(""))
        })
    }
}

#[async_trait]
impl ProcessPort for MockProcessRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        sink: &dyn LineSink,
    ) -> Result<ProcessOutcome, ClipperError> {
        let invocation = Invocation {
            program: program.to_string(),
            args: args.to_vec(),
        };
        self.invocations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(invocation.clone());

        sink.line(
            LineKind::Status,
            &format!("Running: {}", TokioProcessRunner::describe(program, args)),
        );

        let response = self.next_response(program);
        let outcome = response
            .result
            .map_err(|message| ClipperError::LaunchFailure {
                program: program.to_string(),
                message,
            })?;

        if let Some(flag) = &response.creates_file_after {
            if let Some(path) = invocation.arg_after(flag) {
                std::fs::write(PathBuf::from(path), b"")?;
            }
        }

        for line in outcome.stdout.lines() {
            sink.line(LineKind::Stdout, line);
        }
        for line in outcome.stderr.lines() {
            sink.line(LineKind::Stderr, line);
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queue_then_default() {
        let runner = MockProcessRunner::new();
        runner
            .push("ffmpeg", ScriptedResponse::exit(1, "bad"))
            .set_default("ffmpeg", ScriptedResponse::success("fine"));

        let first = runner.run("ffmpeg", &[], &NullSink).await.unwrap();
        let second = runner.run("ffmpeg", &[], &NullSink).await.unwrap();
        let other = runner.run("yt-dlp", &[], &NullSink).await.unwrap();

        assert_eq!(first.exit_code, 1);
        assert_eq!(second.stdout, "fine");
        assert!(other.success());
        assert_eq!(runner.calls_to("ffmpeg").len(), 2);
    }

    #[tokio::test]
    async fn test_launch_failure() {
        let runner = MockProcessRunner::new();
        runner.push("yt-dlp", ScriptedResponse::launch_failure("not found"));
        let err = runner.run("yt-dlp", &[], &NullSink).await.unwrap_err();
        assert!(matches!(err, ClipperError::LaunchFailure { .. }));
        assert_eq!(runner.invocations().len(), 1);
    }

    #[test]
    fn test_arg_after() {
        let invocation = Invocation {
            program: "yt-dlp".to_string(),
            args: vec!["-o".to_string(), "out.mp4".to_string()],
        };
        assert_eq!(invocation.arg_after("-o"), Some("out.mp4"));
        assert_eq!(invocation.arg_after("-f"), None);
    }
}
