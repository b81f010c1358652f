//! Repositories: domain policy on top of the engine.
//!
//! Cached reads go through a [`NetworkBoundResource`](crate::NetworkBoundResource).
//! Writes (create, update, delete) are one-shot: `Loading`, then the remote
//! call and the local mutation under the scope's write lock, then a single
//! `Success` or `Error` carrying no data.

mod capability;
mod share;
mod sharee;

pub use capability::CapabilityRepository;
pub use share::ShareRepository;
pub use sharee::ShareeRepository;

use crate::context::EngineContext;
use crate::coordinator::Scope;
use crate::executor::join_failed;
use crate::live::LiveResource;
use sharesync_core::{Resource, SyncResult};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Runs a blocking write under the lock of `scope` and reports it as a
/// live resource.
pub(crate) fn one_shot<F>(
    context: &EngineContext,
    scope: Scope,
    operation: &'static str,
    work: F,
) -> LiveResource<()>
where
    F: FnOnce() -> SyncResult<()> + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let _ = tx.send(Resource::loading(None));

    let coordinator = Arc::clone(context.coordinator());
    let executor = context.executor().clone();
    context.executor().spawn(async move {
        let outcome = executor
            .spawn_blocking(move || coordinator.with_scope_lock(&scope, work))
            .await
            .unwrap_or_else(|err| Err(join_failed(err)));

        let resource = match outcome {
            Ok(()) => {
                debug!(operation, "share write done");
                Resource::success(None)
            }
            Err(err) => {
                warn!(operation, code = ?err.code(), error = %err, "share write failed");
                Resource::from_error(&err, None)
            }
        };
        let _ = tx.send(resource);
    });

    LiveResource::new(rx)
}
