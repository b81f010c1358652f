//! State shared by the repositories of one engine.

use crate::config::EngineConfig;
use crate::coordinator::RefreshCoordinator;
use crate::executor::TaskExecutor;
use std::sync::Arc;

/// Executor, refresh coordinator and configuration of an engine.
///
/// Cheap to clone; every repository built from the same context shares
/// one coordinator, so their writes to a scope are serialized.
#[derive(Debug, Clone)]
pub struct EngineContext {
    executor: TaskExecutor,
    coordinator: Arc<RefreshCoordinator>,
    config: Arc<EngineConfig>,
}

impl EngineContext {
    /// Creates a context with a fresh coordinator.
    pub fn new(executor: TaskExecutor, config: EngineConfig) -> Self {
        Self {
            executor,
            coordinator: Arc::new(RefreshCoordinator::new()),
            config: Arc::new(config),
        }
    }

    /// Creates a context on the current runtime with the default configuration.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(TaskExecutor::current(), EngineConfig::default())
    }

    /// Gets the executor.
    pub fn executor(&self) -> &TaskExecutor {
        &self.executor
    }

    /// Gets the refresh coordinator.
    pub fn coordinator(&self) -> &Arc<RefreshCoordinator> {
        &self.coordinator
    }

    /// Gets the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
