//! Per-scope write serialization and in-flight refresh coalescing.
//!
//! Every fetch+persist and every one-shot write of a scope runs under the
//! scope's write lock, so two writers of the same rows never interleave.
//! File scopes also hold their account's shares lock for reading; a write
//! to a share whose file is unknown takes that lock exclusively and waits
//! out every refresh of the account.
//! A refresh that finds another refresh of its scope already in flight can
//! join it and share its outcome instead of issuing a second remote call.

use parking_lot::{Mutex, RwLock};
use sharesync_core::{RemoteError, ShareSyncError, SyncResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tracing::trace;

/// The set of rows one write replaces or touches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Shares of one file owned by one account.
    File {
        /// Path of the file.
        file_path: String,
        /// Owning account.
        account: String,
    },
    /// Every share owned by one account.
    Shares(String),
    /// The capability row of one account.
    Account(String),
}

impl Scope {
    /// Creates a file scope.
    pub fn file(file_path: impl Into<String>, account: impl Into<String>) -> Self {
        Scope::File {
            file_path: file_path.into(),
            account: account.into(),
        }
    }

    /// Creates an account scope.
    pub fn account(account: impl Into<String>) -> Self {
        Scope::Account(account.into())
    }

    /// Creates the scope of every share of an account.
    pub fn shares(account: impl Into<String>) -> Self {
        Scope::Shares(account.into())
    }

    /// Scope held for reading while this one is written.
    pub fn parent(&self) -> Option<Scope> {
        match self {
            Scope::File { account, .. } => Some(Scope::shares(account.as_str())),
            Scope::Shares(_) | Scope::Account(_) => None,
        }
    }
}

/// Result of one fetch+persist.
pub type RefreshOutcome = SyncResult<()>;

/// Refresh statistics.
#[derive(Debug, Clone, Default)]
pub struct RefreshStats {
    /// Refreshes that issued their own remote call.
    pub refreshes_started: u64,
    /// Refreshes that joined one already in flight.
    pub refreshes_coalesced: u64,
    /// Refreshes that ended in an error.
    pub refreshes_failed: u64,
    /// Remote calls repeated after a retryable failure.
    pub retries: u64,
    /// Last refresh completion time.
    pub last_refresh_time: Option<Instant>,
    /// Last error message.
    pub last_error: Option<String>,
}

/// Outcome of [`RefreshCoordinator::join`].
#[derive(Debug)]
pub enum Join {
    /// No refresh of the scope was in flight; the caller runs it.
    Leader(LeaderGuard),
    /// A refresh of the scope is in flight; the caller waits for it.
    Follower(Follower),
}

/// Held by the refresh that runs the remote call for a scope.
///
/// Dropping the guard without [`finish`](Self::finish) releases followers
/// with an error.
#[derive(Debug)]
pub struct LeaderGuard {
    coordinator: Arc<RefreshCoordinator>,
    scope: Scope,
    generation: u64,
    persisting: Arc<AtomicBool>,
    tx: watch::Sender<Option<RefreshOutcome>>,
}

impl LeaderGuard {
    /// Flag the leader raises once the remote answer is in and it starts
    /// rewriting the cache. Shared with every follower.
    pub fn persisting(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.persisting)
    }

    /// Publishes the outcome to every follower.
    pub fn finish(self, outcome: RefreshOutcome) {
        self.detach();
        self.tx.send_replace(Some(outcome));
    }

    fn detach(&self) {
        let mut in_flight = self.coordinator.in_flight.lock();
        if in_flight
            .get(&self.scope)
            .is_some_and(|entry| entry.generation == self.generation)
        {
            in_flight.remove(&self.scope);
        }
    }
}

impl Drop for LeaderGuard {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Waits for the outcome of a refresh led by another caller.
#[derive(Debug)]
pub struct Follower {
    persisting: Arc<AtomicBool>,
    rx: watch::Receiver<Option<RefreshOutcome>>,
}

impl Follower {
    /// The leader's persisting flag.
    pub fn persisting(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.persisting)
    }

    /// Waits for the leader's outcome.
    pub async fn wait(mut self) -> RefreshOutcome {
        match self.rx.wait_for(Option::is_some).await {
            Ok(outcome) => match &*outcome {
                Some(outcome) => outcome.clone(),
                None => Err(abandoned()),
            },
            Err(_) => Err(abandoned()),
        }
    }
}

fn abandoned() -> ShareSyncError {
    ShareSyncError::Remote(RemoteError::unknown("refresh abandoned before completion"))
}

#[derive(Debug)]
struct InFlight {
    generation: u64,
    persisting: Arc<AtomicBool>,
    rx: watch::Receiver<Option<RefreshOutcome>>,
}

/// Shared by every repository of an engine.
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    locks: Mutex<HashMap<Scope, Arc<RwLock<()>>>>,
    in_flight: Mutex<HashMap<Scope, InFlight>>,
    next_generation: AtomicU64,
    stats: RwLock<RefreshStats>,
}

impl RefreshCoordinator {
    /// Creates a coordinator with no scope locked.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` while holding the write lock of `scope`, and the read lock
    /// of its parent if it has one.
    ///
    /// Blocks the calling thread while another writer holds the lock; call
    /// it from the blocking pool.
    pub fn with_scope_lock<R>(&self, scope: &Scope, f: impl FnOnce() -> R) -> R {
        let parent = scope.parent().map(|parent| {
            let lock = self.lock_handle(&parent);
            (parent, lock)
        });
        let lock = self.lock_handle(scope);

        let result = {
            let _shared = parent.as_ref().map(|(_, lock)| lock.read());
            let _guard = lock.write();
            trace!(?scope, "scope lock acquired");
            f()
        };

        self.release_handle(scope, lock);
        if let Some((parent, lock)) = parent {
            self.release_handle(&parent, lock);
        }

        result
    }

    fn lock_handle(&self, scope: &Scope) -> Arc<RwLock<()>> {
        self.locks
            .lock()
            .entry(scope.clone())
            .or_insert_with(|| Arc::new(RwLock::new(())))
            .clone()
    }

    fn release_handle(&self, scope: &Scope, lock: Arc<RwLock<()>>) {
        // Only the map and this handle left: nobody else waits on the lock.
        let mut locks = self.locks.lock();
        if Arc::strong_count(&lock) == 2
            && locks
                .get(scope)
                .is_some_and(|current| Arc::ptr_eq(current, &lock))
        {
            locks.remove(scope);
        }
    }

    /// Joins the refresh of `scope` in flight, or becomes its leader.
    pub fn join(self: &Arc<Self>, scope: &Scope) -> Join {
        let mut in_flight = self.in_flight.lock();
        if let Some(entry) = in_flight.get(scope) {
            self.stats.write().refreshes_coalesced += 1;
            trace!(?scope, "joined refresh in flight");
            return Join::Follower(Follower {
                persisting: Arc::clone(&entry.persisting),
                rx: entry.rx.clone(),
            });
        }

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let persisting = Arc::new(AtomicBool::new(false));
        let (tx, rx) = watch::channel(None);
        in_flight.insert(
            scope.clone(),
            InFlight {
                generation,
                persisting: Arc::clone(&persisting),
                rx,
            },
        );
        Join::Leader(LeaderGuard {
            coordinator: Arc::clone(self),
            scope: scope.clone(),
            generation,
            persisting,
            tx,
        })
    }

    /// Returns true if a refresh of `scope` is in flight.
    pub fn is_in_flight(&self, scope: &Scope) -> bool {
        self.in_flight.lock().contains_key(scope)
    }

    /// Number of scopes whose lock is currently held or awaited.
    pub fn locked_scopes(&self) -> usize {
        self.locks.lock().len()
    }

    /// Gets the current stats.
    pub fn stats(&self) -> RefreshStats {
        self.stats.read().clone()
    }

    pub(crate) fn record_started(&self) {
        self.stats.write().refreshes_started += 1;
    }

    pub(crate) fn record_retry(&self) {
        self.stats.write().retries += 1;
    }

    pub(crate) fn record_outcome(&self, outcome: &RefreshOutcome) {
        let mut stats = self.stats.write();
        stats.last_refresh_time = Some(Instant::now());
        match outcome {
            Ok(()) => stats.last_error = None,
            Err(err) => {
                stats.refreshes_failed += 1;
                stats.last_error = Some(err.to_string());
            }
        }
    }
}
