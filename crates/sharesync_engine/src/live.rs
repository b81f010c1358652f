//! The observable output of a repository call.

use sharesync_core::Resource;
use tokio::sync::mpsc;

/// A live sequence of [`Resource`] states.
///
/// The first state is always `Loading` and is available as soon as the
/// repository call returns. Dropping the sequence stops deliveries but does
/// not cancel a refresh already running.
#[derive(Debug)]
pub struct LiveResource<T> {
    rx: mpsc::UnboundedReceiver<Resource<T>>,
}

impl<T> LiveResource<T> {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<Resource<T>>) -> Self {
        Self { rx }
    }

    /// Creates a sequence holding only `resource`, already closed.
    pub fn ready(resource: Resource<T>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(resource);
        Self { rx }
    }

    /// Waits for the next state.
    ///
    /// Returns `None` once the producer has finished and every state was read.
    pub async fn recv(&mut self) -> Option<Resource<T>> {
        self.rx.recv().await
    }

    /// Returns the next state if one is already queued.
    pub fn try_recv(&mut self) -> Option<Resource<T>> {
        self.rx.try_recv().ok()
    }

    /// Blocks the current thread until the next state.
    ///
    /// # Panics
    ///
    /// Panics if called from within an async execution context.
    pub fn blocking_recv(&mut self) -> Option<Resource<T>> {
        self.rx.blocking_recv()
    }

    /// Waits for the first `Success` or `Error` state, skipping `Loading` ones.
    ///
    /// Returns `None` if the sequence ends before a terminal state.
    pub async fn terminal(&mut self) -> Option<Resource<T>> {
        while let Some(resource) = self.rx.recv().await {
            if resource.is_terminal() {
                return Some(resource);
            }
        }
        None
    }

    /// Stops deliveries. States already queued can still be read.
    pub fn close(&mut self) {
        self.rx.close();
    }
}
