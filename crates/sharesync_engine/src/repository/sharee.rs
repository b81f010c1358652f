//! Sharee search. Never cached.

use crate::context::EngineContext;
use crate::executor::join_failed;
use sharesync_core::{RemoteShareeSource, Resource, ShareSyncError, Sharee};
use std::sync::Arc;
use tracing::{debug, warn};

/// Recipient search against the server.
pub struct ShareeRepository<R> {
    remote: Arc<R>,
    context: EngineContext,
}

impl<R: RemoteShareeSource + 'static> ShareeRepository<R> {
    /// Creates a repository.
    pub fn new(remote: Arc<R>, context: EngineContext) -> Self {
        Self { remote, context }
    }

    /// Recipients matching `search`, in server order. `page` is 1-based.
    pub async fn get_sharees(
        &self,
        search: &str,
        page: u32,
        per_page: u32,
    ) -> Resource<Vec<Sharee>> {
        let remote = Arc::clone(&self.remote);
        let term = search.to_string();
        let result = self
            .context
            .executor()
            .spawn_blocking(move || remote.search_sharees(&term, page, per_page))
            .await
            .map_err(join_failed)
            .and_then(|result| result.map_err(ShareSyncError::from));

        match result {
            Ok(sharees) => {
                debug!(search, page, found = sharees.len(), "sharee search done");
                Resource::success(Some(sharees))
            }
            Err(err) => {
                warn!(search, code = ?err.code(), error = %err, "sharee search failed");
                Resource::from_error(&err, None)
            }
        }
    }
}
