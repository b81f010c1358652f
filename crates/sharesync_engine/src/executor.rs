//! Where engine work runs.

use sharesync_core::{RemoteError, ShareSyncError};
use std::future::Future;
use tokio::runtime::Handle;
use tokio::task::{JoinError, JoinHandle};

/// Spawns engine tasks on a tokio runtime.
///
/// Async drive loops run as tasks; remote calls and store writes, which
/// block, run on the runtime's blocking pool.
#[derive(Debug, Clone)]
pub struct TaskExecutor {
    handle: Handle,
}

impl TaskExecutor {
    /// Creates an executor over a runtime handle.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Creates an executor over the runtime of the calling context.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }

    /// Spawns an async task.
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(future)
    }

    /// Runs a blocking closure on the blocking pool.
    pub fn spawn_blocking<F, R>(&self, f: F) -> JoinHandle<R>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        self.handle.spawn_blocking(f)
    }
}

/// Maps a task that panicked or was aborted to an engine error.
pub(crate) fn join_failed(err: JoinError) -> ShareSyncError {
    ShareSyncError::Remote(RemoteError::unknown(format!("background task failed: {err}")))
}
