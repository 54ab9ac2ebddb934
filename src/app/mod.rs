// Application layer - Use case interactors

pub mod batch_interactor;
pub mod clip_executor;
pub mod container;
pub mod dependency_check;
pub mod duration_probe;
pub mod source_acquirer;

// Re-export interactors
pub use batch_interactor::{BatchInteractor, BatchRequest};
pub use clip_executor::{ClipExecutor, ExecutionJob, ExecutionSummary};
pub use container::{AppContainer, DefaultAppContainer};
pub use dependency_check::{DependencyChecker, DependencyReport, Tool, ToolStatus};
pub use duration_probe::DurationProbe;
pub use source_acquirer::SourceAcquirer;
