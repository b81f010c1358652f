//! Local store contracts.
//!
//! Writes are synchronous: once a write returns, every live query whose
//! result it changed has already been republished.

use crate::error::StoreResult;
use crate::live::LiveQuery;
use crate::model::{CapabilityEntity, ShareEntity, ShareType};

/// Cached share rows.
pub trait LocalShareStore: Send + Sync {
    /// Live list of the shares of `file_path` owned by `account` whose type is in `types`.
    fn shares_live(
        &self,
        file_path: &str,
        account: &str,
        types: &[ShareType],
    ) -> LiveQuery<Vec<ShareEntity>>;

    /// Live single share; `None` while no row has this id.
    fn share_live(&self, remote_id: i64) -> LiveQuery<ShareEntity>;

    /// Inserts rows, overwriting rows with the same `remote_id`.
    fn insert(&self, shares: Vec<ShareEntity>) -> StoreResult<()>;

    /// Upserts one row.
    fn update(&self, share: ShareEntity) -> StoreResult<()>;

    /// Replaces every row of the `(file_path, account)` scope with `shares`.
    fn replace_shares(
        &self,
        file_path: &str,
        account: &str,
        shares: Vec<ShareEntity>,
    ) -> StoreResult<()>;

    /// Deletes every row of the `(file_path, account)` scope.
    fn delete_shares_for_file(&self, file_path: &str, account: &str) -> StoreResult<()>;

    /// Deletes the row with this id.
    fn delete_share(&self, remote_id: i64) -> StoreResult<()>;
}

/// Cached capability rows, one per account.
pub trait LocalCapabilityStore: Send + Sync {
    /// Live capability row of `account`; `None` while none is cached.
    fn capability_live(&self, account: &str) -> LiveQuery<CapabilityEntity>;

    /// Current capability row of `account`.
    fn capability(&self, account: &str) -> StoreResult<Option<CapabilityEntity>>;

    /// Upserts rows by `account_owner`.
    fn insert(&self, capabilities: Vec<CapabilityEntity>) -> StoreResult<()>;
}
