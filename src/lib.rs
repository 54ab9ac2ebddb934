//! clipbatch library
//!
//! Cuts a batch of named clips out of one video. The source is either a
//! local file or a URL downloaded with yt-dlp; every clip is extracted with
//! ffmpeg stream copy, one after another.
//!
//! The crate follows a ports-and-adapters layout: `domain` holds the value
//! types and plan validation, `ports` the traits the orchestration talks
//! to, `adapters` their implementations and `app` the use cases.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use adapters::toml_config::{ClipperConfig, ToolsConfig};
pub use app::{BatchInteractor, BatchRequest};
pub use domain::errors::{ClipperError, ClipperResult};
pub use domain::model::{
    BatchReport, ClipOutcome, ClipPlan, ClipPlanEntry, ClipRequest, ClipResult, LineKind,
    OutputFormat, QualityTier, ResolvedSource, RunState, SourceDescriptor,
};
pub use domain::rules::ClipPlanValidator;
pub use ports::{FsPort, LineSink, NullSink, ProcessPort, ProgressSink};
