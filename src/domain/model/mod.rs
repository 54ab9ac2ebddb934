// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::errors::ClipperError;
use crate::utils::time::TimeParser;

/// Raw clip row as entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipRequest {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub name: String,
}

impl ClipRequest {
    pub fn new(start: impl Into<String>, end: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            name: name.into(),
        }
    }

    /// Parse a `START,END[,NAME]` command-line spec
    pub fn parse_spec(spec: &str) -> Result<Self, ClipperError> {
        let mut parts = spec.splitn(3, ',');
        let start = parts.next().unwrap_or_default().trim();
        let end = parts.next().map(str::trim).ok_or_else(|| {
            ClipperError::BadArgs(format!(
                "Clip '{}' must be given as START,END[,NAME]",
                spec
            ))
        })?;
        let name = parts.next().unwrap_or_default();
        Ok(Self::new(start, end, name))
    }
}

/// Validated clip row. Only the plan validator constructs these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipPlanEntry {
    row: usize,
    #[serde(serialize_with = "serialize_time")]
    start: Duration,
    #[serde(serialize_with = "serialize_time")]
    end: Duration,
    name: String,
}

impl ClipPlanEntry {
    pub(crate) fn new(row: usize, start: Duration, end: Duration, name: String) -> Self {
        debug_assert!(end > start);
        Self {
            row,
            start,
            end,
            name,
        }
    }

    /// 1-based row of the request this entry came from
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn start(&self) -> Duration {
        self.start
    }

    pub fn end(&self) -> Duration {
        self.end
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Length of the clip (always positive)
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Ordered, validated clip list with pairwise distinct names
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipPlan {
    entries: Vec<ClipPlanEntry>,
}

impl ClipPlan {
    pub(crate) fn new(entries: Vec<ClipPlanEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ClipPlanEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClipPlanEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a ClipPlan {
    type Item = &'a ClipPlanEntry;
    type IntoIter = std::slice::Iter<'a, ClipPlanEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Download quality, expressed as a maximum video height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum QualityTier {
    P360,
    P480,
    P720,
    #[default]
    P1080,
    P1440,
    P2160,
}

impl QualityTier {
    pub const ALL: [QualityTier; 6] = [
        QualityTier::P360,
        QualityTier::P480,
        QualityTier::P720,
        QualityTier::P1080,
        QualityTier::P1440,
        QualityTier::P2160,
    ];

    /// Maximum height in pixels passed to the downloader's format filter
    pub fn max_height(&self) -> u32 {
        match self {
            QualityTier::P360 => 360,
            QualityTier::P480 => 480,
            QualityTier::P720 => 720,
            QualityTier::P1080 => 1080,
            QualityTier::P1440 => 1440,
            QualityTier::P2160 => 2160,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QualityTier::P360 => "360p",
            QualityTier::P480 => "480p",
            QualityTier::P720 => "720p",
            QualityTier::P1080 => "1080p",
            QualityTier::P1440 => "1440p",
            QualityTier::P2160 => "2160p",
        }
    }
}

impl FromStr for QualityTier {
    type Err = ClipperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let height = match normalized.as_str() {
            "2k" => "1440",
            "4k" => "2160",
            other => other.strip_suffix('p').unwrap_or(other),
        };
        QualityTier::ALL
            .into_iter()
            .find(|tier| tier.max_height().to_string() == height)
            .ok_or_else(|| {
                ClipperError::BadArgs(format!(
                    "Invalid quality: {}. Valid qualities: 360p, 480p, 720p, 1080p, 1440p (2K), 2160p (4K)",
                    s
                ))
            })
    }
}

impl TryFrom<String> for QualityTier {
    type Error = ClipperError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<QualityTier> for String {
    fn from(tier: QualityTier) -> Self {
        tier.label().to_string()
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Container of the produced clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OutputFormat {
    #[default]
    Mp4,
    Mkv,
    Mov,
    Avi,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Mp4 => "mp4",
            OutputFormat::Mkv => "mkv",
            OutputFormat::Mov => "mov",
            OutputFormat::Avi => "avi",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ClipperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "mp4" => Ok(OutputFormat::Mp4),
            "mkv" => Ok(OutputFormat::Mkv),
            "mov" => Ok(OutputFormat::Mov),
            "avi" => Ok(OutputFormat::Avi),
            _ => Err(ClipperError::BadArgs(format!(
                "Invalid output format: {}. Valid formats: mp4, mkv, mov, avi",
                s
            ))),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = ClipperError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OutputFormat> for String {
    fn from(format: OutputFormat) -> Self {
        format.extension().to_string()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Where the video to cut comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceDescriptor {
    Remote { url: String, quality: QualityTier },
    Local { path: PathBuf },
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceDescriptor::Remote { url, quality } => write!(f, "{} ({})", url, quality),
            SourceDescriptor::Local { path } => write!(f, "{}", path.display()),
        }
    }
}

/// Local file ready for cutting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSource {
    pub path: PathBuf,
    /// Downloaded by us and eligible for cleanup; user files are never deleted
    pub is_temporary: bool,
}

impl ResolvedSource {
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_temporary: false,
        }
    }

    pub fn temporary(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_temporary: true,
        }
    }
}

/// Captured result of one external invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Exit code, `-1` when terminated by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutcome {
    pub fn new(exit_code: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Origin of a line delivered to a line sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// Tool standard output
    Stdout,
    /// Tool standard error
    Stderr,
    /// Message produced by clipbatch itself
    Status,
}

/// How a single clip ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipOutcome {
    Succeeded,
    Failed,
    /// Not attempted because the run was cancelled
    Skipped,
}

/// Per-entry record produced by the executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipResult {
    pub entry: ClipPlanEntry,
    pub output_path: PathBuf,
    pub outcome: ClipOutcome,
    pub error: Option<String>,
}

impl ClipResult {
    pub fn succeeded(entry: ClipPlanEntry, output_path: PathBuf) -> Self {
        Self {
            entry,
            output_path,
            outcome: ClipOutcome::Succeeded,
            error: None,
        }
    }

    pub fn failed(entry: ClipPlanEntry, output_path: PathBuf, error: &ClipperError) -> Self {
        Self {
            entry,
            output_path,
            outcome: ClipOutcome::Failed,
            error: Some(error.to_string()),
        }
    }

    pub fn skipped(entry: ClipPlanEntry, output_path: PathBuf) -> Self {
        Self {
            entry,
            output_path,
            outcome: ClipOutcome::Skipped,
            error: Some("run cancelled before this clip started".to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == ClipOutcome::Succeeded
    }
}

/// Lifecycle of one batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunState {
    Idle,
    Validating,
    AcquiringSource,
    /// `index` is 1-based
    Executing { index: usize, total: usize },
    Cleaning,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => f.write_str("idle"),
            RunState::Validating => f.write_str("validating"),
            RunState::AcquiringSource => f.write_str("acquiring source"),
            RunState::Executing { index, total } => write!(f, "executing {} of {}", index, total),
            RunState::Cleaning => f.write_str("cleaning"),
            RunState::Done => f.write_str("done"),
            RunState::Failed => f.write_str("failed"),
        }
    }
}

/// Final outcome of a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub results: Vec<ClipResult>,
    pub source: ResolvedSource,
    /// Whether a temporary source was deleted after the run
    pub source_removed: bool,
    pub cancelled: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome == ClipOutcome::Failed)
            .count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.succeeded() == self.total()
    }

    /// One-line summary such as `2 of 3 clips succeeded`
    pub fn summary(&self) -> String {
        let mut line = format!("{} of {} clips succeeded", self.succeeded(), self.total());
        if self.cancelled {
            line.push_str(" (cancelled)");
        }
        line
    }
}

fn serialize_time<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&TimeParser::format_time(*value))
}
