//! In-memory share rows.

use crate::notifier::ChangeNotifier;
use crate::stats::StoreStats;
use parking_lot::Mutex;
use sharesync_core::{LiveQuery, LocalShareStore, ShareEntity, ShareType, StoreError, StoreResult};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Share rows keyed by remote id.
#[derive(Debug, Default)]
struct ShareTable {
    rows: BTreeMap<i64, ShareEntity>,
}

impl ShareTable {
    fn for_file(&self, file_path: &str, account: &str, types: &[ShareType]) -> Vec<ShareEntity> {
        self.rows
            .values()
            .filter(|share| share.in_file_scope(file_path, account))
            .filter(|share| types.contains(&share.share_type))
            .cloned()
            .collect()
    }

    fn remove_file_scope(&mut self, file_path: &str, account: &str) -> usize {
        let before = self.rows.len();
        self.rows
            .retain(|_, share| !share.in_file_scope(file_path, account));
        before - self.rows.len()
    }

    fn put(&mut self, share: ShareEntity) {
        self.rows.insert(share.remote_id, share);
    }
}

/// An in-memory [`LocalShareStore`].
///
/// # Thread Safety
///
/// Writes take a single lock and publish affected live queries before
/// releasing it, so concurrent writers never interleave their notifications.
///
/// # Example
///
/// ```rust
/// use sharesync_core::{LocalShareStore, ShareType};
/// use sharesync_store::InMemoryShareStore;
///
/// let store = InMemoryShareStore::new();
/// let live = store.shares_live("/Photos", "admin@server", &ShareType::PRIVATE);
/// assert_eq!(live.snapshot(), Some(vec![]));
/// ```
pub struct InMemoryShareStore {
    state: Mutex<ShareTable>,
    notifier: ChangeNotifier<ShareTable>,
    stats: StoreStats,
    closed: AtomicBool,
}

impl InMemoryShareStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ShareTable::default()),
            notifier: ChangeNotifier::new(),
            stats: StoreStats::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Creates a store pre-populated with `shares`, without counting writes.
    pub fn with_shares(shares: impl IntoIterator<Item = ShareEntity>) -> Self {
        let store = Self::new();
        {
            let mut state = store.state.lock();
            for share in shares {
                state.put(share);
            }
        }
        store
    }

    /// Returns the write counters.
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Returns every row, ordered by remote id.
    pub fn all(&self) -> Vec<ShareEntity> {
        self.state.lock().rows.values().cloned().collect()
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.state.lock().rows.len()
    }

    /// Returns true if the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of live queries that still have readers.
    pub fn active_live_queries(&self) -> usize {
        let state = self.state.lock();
        self.notifier.notify(&state);
        self.notifier.subscriber_count()
    }

    /// Makes every later write fail with [`StoreError::Closed`].
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    fn write<F>(&self, mutate: F) -> StoreResult<()>
    where
        F: FnOnce(&mut ShareTable),
    {
        if self.closed.load(Ordering::SeqCst) {
            return Err(StoreError::Closed);
        }
        let mut state = self.state.lock();
        mutate(&mut state);
        self.notifier.notify(&state);
        Ok(())
    }
}

impl Default for InMemoryShareStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalShareStore for InMemoryShareStore {
    fn shares_live(
        &self,
        file_path: &str,
        account: &str,
        types: &[ShareType],
    ) -> LiveQuery<Vec<ShareEntity>> {
        self.stats.record_live_query();
        let file_path = file_path.to_string();
        let account = account.to_string();
        let types = types.to_vec();
        let state = self.state.lock();
        self.notifier.subscribe(&state, move |table: &ShareTable| {
            Some(table.for_file(&file_path, &account, &types))
        })
    }

    fn share_live(&self, remote_id: i64) -> LiveQuery<ShareEntity> {
        self.stats.record_live_query();
        let state = self.state.lock();
        self.notifier.subscribe(&state, move |table: &ShareTable| {
            table.rows.get(&remote_id).cloned()
        })
    }

    fn insert(&self, shares: Vec<ShareEntity>) -> StoreResult<()> {
        let count = shares.len();
        self.write(|table| {
            for share in shares {
                table.put(share);
            }
        })?;
        self.stats.record_insert();
        debug!(rows = count, "inserted shares");
        Ok(())
    }

    fn update(&self, share: ShareEntity) -> StoreResult<()> {
        let remote_id = share.remote_id;
        self.write(|table| table.put(share))?;
        self.stats.record_update();
        debug!(remote_id, "updated share");
        Ok(())
    }

    fn replace_shares(
        &self,
        file_path: &str,
        account: &str,
        shares: Vec<ShareEntity>,
    ) -> StoreResult<()> {
        let count = shares.len();
        self.write(|table| {
            table.remove_file_scope(file_path, account);
            for share in shares {
                table.put(share);
            }
        })?;
        self.stats.record_replace();
        debug!(file_path, account, rows = count, "replaced shares for file");
        Ok(())
    }

    fn delete_shares_for_file(&self, file_path: &str, account: &str) -> StoreResult<()> {
        let mut removed = 0;
        self.write(|table| removed = table.remove_file_scope(file_path, account))?;
        self.stats.record_delete();
        debug!(file_path, account, removed, "deleted shares for file");
        Ok(())
    }

    fn delete_share(&self, remote_id: i64) -> StoreResult<()> {
        self.write(|table| {
            table.rows.remove(&remote_id);
        })?;
        self.stats.record_delete();
        debug!(remote_id, "deleted share");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(remote_id: i64, path: &str, share_type: ShareType, account: &str) -> ShareEntity {
        ShareEntity {
            remote_id,
            file_path: path.to_string(),
            is_folder: false,
            share_type,
            share_with: format!("user{remote_id}"),
            shared_with_display_name: format!("User {remote_id}"),
            shared_with_additional_info: None,
            permissions: 1,
            shared_date: 0,
            expiration_date: None,
            token: String::new(),
            name: String::new(),
            share_link: String::new(),
            account_owner: account.to_string(),
        }
    }

    #[test]
    fn query_filters_by_scope_and_type() {
        let store = InMemoryShareStore::with_shares([
            share(1, "/a", ShareType::User, "admin"),
            share(2, "/a", ShareType::PublicLink, "admin"),
            share(3, "/a", ShareType::User, "other"),
            share(4, "/b", ShareType::Group, "admin"),
        ]);

        let private = store.shares_live("/a", "admin", &ShareType::PRIVATE);
        let ids: Vec<i64> = private.snapshot().unwrap().iter().map(|s| s.remote_id).collect();
        assert_eq!(ids, vec![1]);

        let public = store.shares_live("/a", "admin", &ShareType::PUBLIC);
        assert_eq!(public.snapshot().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn replace_republishes_scope() {
        let store = InMemoryShareStore::with_shares([share(1, "/a", ShareType::User, "admin")]);
        let mut live = store.shares_live("/a", "admin", &ShareType::PRIVATE);
        live.snapshot_and_mark_seen();

        store
            .replace_shares("/a", "admin", vec![share(2, "/a", ShareType::Group, "admin")])
            .unwrap();

        let rows = live.changed().await.unwrap().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].remote_id, 2);
        assert_eq!(store.stats().replaces(), 1);
    }

    #[test]
    fn delete_for_file_keeps_other_scopes() {
        let store = InMemoryShareStore::with_shares([
            share(1, "/a", ShareType::User, "admin"),
            share(2, "/a", ShareType::User, "other"),
            share(3, "/b", ShareType::User, "admin"),
        ]);
        store.delete_shares_for_file("/a", "admin").unwrap();

        let ids: Vec<i64> = store.all().iter().map(|s| s.remote_id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn single_share_lifecycle() {
        let store = InMemoryShareStore::new();
        let mut live = store.share_live(9);
        assert_eq!(live.snapshot_and_mark_seen(), None);

        store.insert(vec![share(9, "/a", ShareType::User, "admin")]).unwrap();
        assert_eq!(live.changed().await.unwrap().map(|s| s.remote_id), Some(9));

        let mut edited = share(9, "/a", ShareType::User, "admin");
        edited.permissions = 3;
        store.update(edited).unwrap();
        assert_eq!(live.changed().await.unwrap().map(|s| s.permissions), Some(3));

        store.delete_share(9).unwrap();
        assert_eq!(live.changed().await, Some(None));
    }

    #[test]
    fn closed_store_rejects_writes() {
        let store = InMemoryShareStore::new();
        store.close();
        assert_eq!(store.insert(vec![]), Err(StoreError::Closed));
        assert_eq!(store.stats().inserts(), 0);
    }

    #[test]
    fn dropped_live_queries_are_released() {
        let store = InMemoryShareStore::new();
        let live = store.shares_live("/a", "admin", &ShareType::PUBLIC);
        assert_eq!(store.active_live_queries(), 1);
        drop(live);
        assert_eq!(store.active_live_queries(), 0);
    }
}
