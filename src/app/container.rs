use std::sync::Arc;

use crate::adapters::toml_config::ToolsConfig;
use crate::adapters::{StdFsAdapter, TokioProcessRunner};
use crate::app::batch_interactor::BatchInteractor;
use crate::app::dependency_check::DependencyChecker;
use crate::app::duration_probe::DurationProbe;
use crate::ports::{FsPort, ProcessPort};

pub trait AppContainer: Send + Sync {
    fn batch_interactor(&self) -> Arc<BatchInteractor>;
    fn duration_probe(&self) -> Arc<DurationProbe>;
    fn dependency_checker(&self) -> Arc<DependencyChecker>;
}

pub struct DefaultAppContainer {
    batch_interactor: Arc<BatchInteractor>,
    duration_probe: Arc<DurationProbe>,
    dependency_checker: Arc<DependencyChecker>,
}

impl DefaultAppContainer {
    /// Wire the interactors to real processes and the local disk
    pub fn new(tools: ToolsConfig) -> Self {
        Self::with_ports(
            Arc::new(TokioProcessRunner::new()),
            Arc::new(StdFsAdapter::new()),
            tools,
        )
    }

    /// Wire the interactors to the given ports
    pub fn with_ports(
        process_port: Arc<dyn ProcessPort>,
        fs_port: Arc<dyn FsPort>,
        tools: ToolsConfig,
    ) -> Self {
        let batch_interactor = Arc::new(BatchInteractor::new(
            Arc::clone(&process_port),
            Arc::clone(&fs_port),
            tools.clone(),
        ));

        let duration_probe = Arc::new(DurationProbe::new(
            Arc::clone(&process_port),
            tools.clone(),
        ));

        let dependency_checker = Arc::new(DependencyChecker::new(process_port, tools));

        Self {
            batch_interactor,
            duration_probe,
            dependency_checker,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn batch_interactor(&self) -> Arc<BatchInteractor> {
        Arc::clone(&self.batch_interactor)
    }

    fn duration_probe(&self) -> Arc<DurationProbe> {
        Arc::clone(&self.duration_probe)
    }

    fn dependency_checker(&self) -> Arc<DependencyChecker> {
        Arc::clone(&self.dependency_checker)
    }
}
