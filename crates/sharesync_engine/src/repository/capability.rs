//! Server capabilities, one row per account.

use crate::bound::{CacheStrategy, NetworkBoundResource};
use crate::context::EngineContext;
use crate::coordinator::Scope;
use crate::live::LiveResource;
use sharesync_core::{
    CapabilityEntity, LiveQuery, LocalCapabilityStore, RemoteCapability, RemoteCapabilitySource,
    RemoteResult, StoreResult, SyncResult,
};
use std::sync::Arc;

/// Cached server capabilities.
pub struct CapabilityRepository<L, R> {
    local: Arc<L>,
    remote: Arc<R>,
    context: EngineContext,
}

impl<L, R> CapabilityRepository<L, R>
where
    L: LocalCapabilityStore + 'static,
    R: RemoteCapabilitySource + 'static,
{
    /// Creates a repository.
    pub fn new(local: Arc<L>, remote: Arc<R>, context: EngineContext) -> Self {
        Self {
            local,
            remote,
            context,
        }
    }

    /// Capabilities of the server `account` lives on.
    ///
    /// With `force_network` false the cached row is emitted as is.
    pub fn get_capability_for_account(
        &self,
        account: &str,
        force_network: bool,
    ) -> LiveResource<CapabilityEntity> {
        let strategy = AccountCapability {
            account: account.to_string(),
            force_network,
            local: Arc::clone(&self.local),
            remote: Arc::clone(&self.remote),
        };
        NetworkBoundResource::new(strategy, self.context.clone()).as_live_resource()
    }

    /// Cached capabilities of `account`, without any remote call.
    pub fn get_stored_capability(&self, account: &str) -> SyncResult<Option<CapabilityEntity>> {
        Ok(self.local.capability(account)?)
    }
}

struct AccountCapability<L, R> {
    account: String,
    force_network: bool,
    local: Arc<L>,
    remote: Arc<R>,
}

impl<L, R> CacheStrategy for AccountCapability<L, R>
where
    L: LocalCapabilityStore + 'static,
    R: RemoteCapabilitySource + 'static,
{
    type Local = CapabilityEntity;
    type Remote = RemoteCapability;

    fn load_from_local(&self) -> LiveQuery<CapabilityEntity> {
        self.local.capability_live(&self.account)
    }

    fn should_refresh(&self, _snapshot: Option<&CapabilityEntity>) -> bool {
        self.force_network
    }

    fn fetch_remote(&self) -> RemoteResult<RemoteCapability> {
        self.remote.get_capabilities(&self.account)
    }

    fn persist(&self, remote: RemoteCapability) -> StoreResult<()> {
        self.local.insert(vec![CapabilityEntity::from_remote_capability(
            remote,
            &self.account,
        )])
    }

    fn scope(&self) -> Option<Scope> {
        Some(Scope::account(&self.account))
    }
}
