// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod fs_std;
pub mod mock_process;
pub mod probe_ffprobe;
pub mod process_tokio;
pub mod toml_config;
pub mod tracing_log;
pub mod ytdlp;

// Re-export adapters
pub use fs_std::StdFsAdapter;
pub use mock_process::{Invocation, MockProcessRunner, ScriptedResponse};
pub use process_tokio::TokioProcessRunner;
pub use toml_config::{ClipperConfig, TomlConfigAdapter, ToolsConfig};
pub use tracing_log::TracingLogAdapter;
