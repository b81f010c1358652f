//! The cache-then-refresh engine.
//!
//! A [`NetworkBoundResource`] binds a [`CacheStrategy`] to an engine and
//! turns it into a [`LiveResource`]:
//!
//! 1. The current cache is emitted as `Loading` before the call returns.
//! 2. If the strategy asks for a refresh, the remote fetch and the persist
//!    run on the blocking pool under the scope's write lock.
//! 3. Cache changes seen while the fetch is in flight are emitted as `Loading`.
//! 4. The outcome is emitted once: `Success` with the cache as re-read after
//!    the persist, or `Error` with the last known cache.
//! 5. Later cache changes keep flowing, tagged like the outcome.

use crate::config::RetryConfig;
use crate::context::EngineContext;
use crate::coordinator::{Join, RefreshCoordinator, RefreshOutcome, Scope};
use crate::executor::join_failed;
use crate::live::LiveResource;
use sharesync_core::{LiveQuery, RemoteResult, Resource, StoreResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

/// The four operations the engine orchestrates.
///
/// `fetch_remote` and `persist` block and are only ever called from the
/// blocking pool.
pub trait CacheStrategy: Send + Sync + 'static {
    /// Cached form, as observed by callers.
    type Local: Clone + Send + Sync + 'static;
    /// Remote form, as returned by the server.
    type Remote: Send + 'static;

    /// Live query over the cached rows.
    fn load_from_local(&self) -> LiveQuery<Self::Local>;

    /// Decides from the current snapshot whether to hit the network.
    fn should_refresh(&self, snapshot: Option<&Self::Local>) -> bool;

    /// Fetches the authoritative answer.
    fn fetch_remote(&self) -> RemoteResult<Self::Remote>;

    /// Writes the remote answer into the cache.
    fn persist(&self, remote: Self::Remote) -> StoreResult<()>;

    /// Rows the persist rewrites. `None` skips locking and coalescing.
    fn scope(&self) -> Option<Scope> {
        None
    }
}

/// A strategy bound to an engine.
pub struct NetworkBoundResource<S> {
    strategy: Arc<S>,
    context: EngineContext,
}

impl<S: CacheStrategy> NetworkBoundResource<S> {
    /// Binds `strategy` to the engine of `context`.
    pub fn new(strategy: S, context: EngineContext) -> Self {
        Self {
            strategy: Arc::new(strategy),
            context,
        }
    }

    /// Starts the resource and returns its live sequence.
    ///
    /// The first state, `Loading` with the current cache, is already queued
    /// when this returns.
    pub fn as_live_resource(self) -> LiveResource<S::Local> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut live = self.strategy.load_from_local();
        let snapshot = live.snapshot_and_mark_seen();
        let refresh = self.strategy.should_refresh(snapshot.as_ref());
        debug!(scope = ?self.strategy.scope(), refresh, "resource started");

        let _ = tx.send(Resource::loading(snapshot.clone()));

        if refresh {
            let (task, persisting) = self.start_refresh();
            self.context
                .executor()
                .spawn(drive_refresh(live, task, persisting, tx));
        } else {
            let _ = tx.send(Resource::success(snapshot));
            self.context
                .executor()
                .spawn(forward(live, tx, Resource::success));
        }

        LiveResource::new(rx)
    }

    /// Spawns the fetch+persist, or joins the one in flight for the scope.
    fn start_refresh(&self) -> (JoinHandle<RefreshOutcome>, Arc<AtomicBool>) {
        let executor = self.context.executor();
        let scope = self
            .strategy
            .scope()
            .filter(|_| self.context.config().coalesce_refreshes);

        match scope.map(|scope| self.context.coordinator().join(&scope)) {
            Some(Join::Leader(guard)) => {
                let persisting = guard.persisting();
                let run = fetch_and_persist(
                    Arc::clone(&self.strategy),
                    self.context.clone(),
                    Arc::clone(&persisting),
                );
                let task = executor.spawn(async move {
                    let outcome = run.await;
                    guard.finish(outcome.clone());
                    outcome
                });
                (task, persisting)
            }
            Some(Join::Follower(follower)) => {
                debug!(scope = ?self.strategy.scope(), "waiting for refresh in flight");
                let persisting = follower.persisting();
                (executor.spawn(follower.wait()), persisting)
            }
            None => {
                let persisting = Arc::new(AtomicBool::new(false));
                let run = fetch_and_persist(
                    Arc::clone(&self.strategy),
                    self.context.clone(),
                    Arc::clone(&persisting),
                );
                (executor.spawn(run), persisting)
            }
        }
    }
}

async fn fetch_and_persist<S: CacheStrategy>(
    strategy: Arc<S>,
    context: EngineContext,
    persisting: Arc<AtomicBool>,
) -> RefreshOutcome {
    let coordinator = Arc::clone(context.coordinator());
    let retry = context.config().retry.clone();
    coordinator.record_started();

    let blocking = Arc::clone(&coordinator);
    let outcome = context
        .executor()
        .spawn_blocking(move || {
            let run = || -> RefreshOutcome {
                let remote = fetch_with_retry(&*strategy, &retry, &blocking)?;
                persisting.store(true, Ordering::SeqCst);
                strategy.persist(remote)?;
                Ok(())
            };
            match strategy.scope() {
                Some(scope) => blocking.with_scope_lock(&scope, run),
                None => run(),
            }
        })
        .await
        .unwrap_or_else(|err| Err(join_failed(err)));

    coordinator.record_outcome(&outcome);
    outcome
}

fn fetch_with_retry<S: CacheStrategy>(
    strategy: &S,
    retry: &RetryConfig,
    coordinator: &RefreshCoordinator,
) -> RemoteResult<S::Remote> {
    let mut attempt = 0;
    loop {
        match strategy.fetch_remote() {
            Ok(remote) => return Ok(remote),
            Err(err) if err.is_retryable() && attempt + 1 < retry.max_attempts => {
                attempt += 1;
                let delay = retry.delay_for_attempt(attempt);
                warn!(attempt, ?delay, error = %err, "remote fetch failed, retrying");
                coordinator.record_retry();
                std::thread::sleep(delay);
            }
            Err(err) => return Err(err),
        }
    }
}

async fn drive_refresh<T: Clone + Send + Sync + 'static>(
    mut live: LiveQuery<T>,
    mut task: JoinHandle<RefreshOutcome>,
    persisting: Arc<AtomicBool>,
    tx: mpsc::UnboundedSender<Resource<T>>,
) {
    let mut live_open = true;
    let outcome = loop {
        tokio::select! {
            biased;
            joined = &mut task => break joined.unwrap_or_else(|err| Err(join_failed(err))),
            changed = live.changed(), if live_open => match changed {
                // The persist's own write shows up in the terminal state.
                Some(_) if persisting.load(Ordering::SeqCst) => {}
                Some(data) => {
                    trace!("cache changed during refresh");
                    let _ = tx.send(Resource::loading(data));
                }
                None => live_open = false,
            },
            _ = tx.closed() => {
                trace!("resource dropped during refresh");
                return;
            }
        }
    };

    match outcome {
        Ok(()) => {
            let data = live.snapshot_and_mark_seen();
            debug!("refresh succeeded");
            if tx.send(Resource::success(data)).is_ok() && live_open {
                forward(live, tx, Resource::success).await;
            }
        }
        Err(err) => {
            warn!(code = ?err.code(), error = %err, "refresh failed");
            let data = live.snapshot_and_mark_seen();
            if tx.send(Resource::from_error(&err, data)).is_ok() && live_open {
                forward(live, tx, move |data| Resource::from_error(&err, data)).await;
            }
        }
    }
}

/// Forwards cache changes until either side goes away.
async fn forward<T, F>(mut live: LiveQuery<T>, tx: mpsc::UnboundedSender<Resource<T>>, wrap: F)
where
    T: Clone + Send + Sync + 'static,
    F: Fn(Option<T>) -> Resource<T> + Send + 'static,
{
    loop {
        tokio::select! {
            changed = live.changed() => match changed {
                Some(data) => {
                    if tx.send(wrap(data)).is_err() {
                        return;
                    }
                }
                None => return,
            },
            _ = tx.closed() => return,
        }
    }
}
