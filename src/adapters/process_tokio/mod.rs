//! Tokio process adapter
//!
//! Runs external tools with piped output and forwards each line to the
//! caller's sink as soon as it is read.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Process runner backed by `tokio::process`
#[derive(Debug, Default, Clone)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self
    }

    /// Render a command line for log output
    pub fn describe(program: &str, args: &[String]) -> String {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                line.push('"');
                line.push_str(arg);
                line.push('"');
            } else {
                line.push_str(arg);
            }
        }
        line
    }
}

/// Reads one stream segment by segment, decoding lossily
///
/// A read error drops the underlying pipe so the child sees it closed
/// instead of blocking on a full buffer.
struct LineReader<R> {
    inner: Option<tokio::io::Split<BufReader<R>>>,
    done: bool,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            inner: Some(BufReader::new(reader).split(b'\n')),
            done: false,
        }
    }

    async fn next(&mut self) -> Option<String> {
        let inner = self.inner.as_mut()?;
        match inner.next_segment().await {
            Ok(Some(mut bytes)) => {
                if bytes.last() == Some(&b'\r') {
                    bytes.pop();
                }
                Some(String::from_utf8_lossy(&bytes).into_owned())
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read process output: {}", e);
                self.inner = None;
                None
            }
        }
    }
}

#[async_trait]
impl ProcessPort for TokioProcessRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        sink: &dyn LineSink,
    ) -> Result<ProcessOutcome, ClipperError> {
        let command_line = Self::describe(program, args);
        sink.line(LineKind::Status, &format!("Running: {}", command_line));
        debug!(program, ?args, "spawning process");

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ClipperError::LaunchFailure {
                program: program.to_string(),
                message: e.to_string(),
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ClipperError::Io("child stdout was not captured".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| ClipperError::Io("child stderr was not captured".to_string()))?;

        let mut out_reader = LineReader::new(stdout);
        let mut err_reader = LineReader::new(stderr);
        let mut captured_out = String::new();
        let mut captured_err = String::new();

        while !(out_reader.done && err_reader.done) {
            tokio::select! {
                line = out_reader.next(), if !out_reader.done => match line {
                    Some(line) => {
                        sink.line(LineKind::Stdout, &line);
                        captured_out.push_str(&line);
                        captured_out.push('\n');
                    }
                    None => out_reader.done = true,
                },
                line = err_reader.next(), if !err_reader.done => match line {
                    Some(line) => {
                        sink.line(LineKind::Stderr, &line);
                        captured_err.push_str(&line);
                        captured_err.push('\n');
                    }
                    None => err_reader.done = true,
                },
            }
        }

        let status = child.wait().await?;
        let exit_code = status.code().unwrap_or(-1);
        debug!(program, exit_code, "process exited");

        Ok(ProcessOutcome::new(exit_code, captured_out, captured_err))
    }
}
