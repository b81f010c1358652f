//! In-memory capability rows.

use crate::notifier::ChangeNotifier;
use crate::stats::StoreStats;
use parking_lot::Mutex;
use sharesync_core::{CapabilityEntity, LiveQuery, LocalCapabilityStore, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

type CapabilityTable = HashMap<String, CapabilityEntity>;

/// An in-memory [`LocalCapabilityStore`], one row per account.
pub struct InMemoryCapabilityStore {
    state: Mutex<CapabilityTable>,
    notifier: ChangeNotifier<CapabilityTable>,
    stats: StoreStats,
    closed: AtomicBool,
}

impl InMemoryCapabilityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HashMap::new()),
            notifier: ChangeNotifier::new(),
            stats: StoreStats::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Creates a store pre-populated with `capabilities`, without counting writes.
    pub fn with_capabilities(capabilities: impl IntoIterator<Item = CapabilityEntity>) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.lock();
            for capability in capabilities {
                state.insert(capability.account_owner.clone(), capability);
            }
        }
        store
    }

    /// Returns the write counters.
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Makes every later write fail with [`StoreError::Closed`].
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

impl Default for InMemoryCapabilityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalCapabilityStore for InMemoryCapabilityStore {
    fn capability_live(&self, account: &str) -> LiveQuery<CapabilityEntity> {
        self.stats.record_live_query();
        let account = account.to_string();
        let state = self.state.lock();
        self.notifier
            .subscribe(&state, move |table: &CapabilityTable| table.get(&account).cloned())
    }

    fn capability(&self, account: &str) -> StoreResult<Option<CapabilityEntity>> {
        Ok(self.state.lock().get(account).cloned())
    }

    fn insert(&self, capabilities: Vec<CapabilityEntity>) -> StoreResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Closed);
        }
        let count = capabilities.len();
        {
            let mut state = self.state.lock();
            for capability in capabilities {
                state.insert(capability.account_owner.clone(), capability);
            }
            self.notifier.notify(&state);
        }
        self.stats.record_insert();
        debug!(rows = count, "upserted capabilities");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharesync_core::{CapabilityFlag, RemoteCapability};

    fn capability(account: &str, resharing: bool) -> CapabilityEntity {
        let remote = RemoteCapability {
            resharing: CapabilityFlag::from(resharing),
            ..RemoteCapability::default()
        };
        CapabilityEntity::from_remote_capability(remote, account)
    }

    #[tokio::test]
    async fn upsert_replaces_account_row() {
        let store = InMemoryCapabilityStore::new();
        let mut live = store.capability_live("admin@server");
        assert_eq!(live.snapshot_and_mark_seen(), None);

        store.insert(vec![capability("admin@server", false)]).unwrap();
        let first = live.changed().await.unwrap().unwrap();
        assert!(!first.resharing.is_true());

        store.insert(vec![capability("admin@server", true)]).unwrap();
        let second = live.changed().await.unwrap().unwrap();
        assert!(second.resharing.is_true());
        assert_eq!(store.stats().inserts(), 2);
    }

    #[test]
    fn accounts_are_independent() {
        let store = InMemoryCapabilityStore::with_capabilities([capability("a@server", true)]);
        store.insert(vec![capability("b@server", false)]).unwrap();

        assert!(store.capability("a@server").unwrap().unwrap().resharing.is_true());
        assert!(!store.capability("b@server").unwrap().unwrap().resharing.is_true());
        assert_eq!(store.capability("c@server").unwrap(), None);
    }
}
