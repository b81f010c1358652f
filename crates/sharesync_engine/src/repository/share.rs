//! Shares of files, private and public.

use super::one_shot;
use crate::bound::{CacheStrategy, NetworkBoundResource};
use crate::context::EngineContext;
use crate::coordinator::Scope;
use crate::live::LiveResource;
use sharesync_core::{
    CreateShareRequest, LiveQuery, LocalShareStore, RemoteError, RemoteResult, RemoteShare,
    RemoteShareSource, ShareEntity, ShareSyncError, ShareType, StoreResult, SyncResult,
    UpdateShareRequest,
};
use std::sync::Arc;
use tracing::debug;

/// Shares of the files of one account.
///
/// Reads emit the cached shares of a file and refresh them from the server;
/// a refresh replaces the whole `(file, account)` scope, so shares removed
/// on the server disappear locally.
pub struct ShareRepository<L, R> {
    account: String,
    local: Arc<L>,
    remote: Arc<R>,
    context: EngineContext,
}

impl<L, R> ShareRepository<L, R>
where
    L: LocalShareStore + 'static,
    R: RemoteShareSource + 'static,
{
    /// Creates a repository for `account`.
    pub fn new(
        account: impl Into<String>,
        local: Arc<L>,
        remote: Arc<R>,
        context: EngineContext,
    ) -> Self {
        Self {
            account: account.into(),
            local,
            remote,
            context,
        }
    }

    /// Gets the account rows are stamped with.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// User, group and federated shares of `file_path`.
    pub fn get_private_shares(&self, file_path: &str) -> LiveResource<Vec<ShareEntity>> {
        self.get_shares(file_path, &ShareType::PRIVATE)
    }

    /// Public links of `file_path`.
    pub fn get_public_shares(&self, file_path: &str) -> LiveResource<Vec<ShareEntity>> {
        self.get_shares(file_path, &ShareType::PUBLIC)
    }

    fn get_shares(&self, file_path: &str, types: &[ShareType]) -> LiveResource<Vec<ShareEntity>> {
        let config = self.context.config();
        let strategy = FileShares {
            file_path: file_path.to_string(),
            account: self.account.clone(),
            types: types.to_vec(),
            reshares: config.fetch_reshares,
            subfiles: config.fetch_subfiles,
            local: Arc::clone(&self.local),
            remote: Arc::clone(&self.remote),
        };
        NetworkBoundResource::new(strategy, self.context.clone()).as_live_resource()
    }

    /// Cached share with this id. Never hits the network.
    pub fn get_share(&self, remote_id: i64) -> LiveQuery<ShareEntity> {
        self.local.share_live(remote_id)
    }

    /// Shares `file_path` with a user, group or federated recipient.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a public-link type, before any remote call.
    pub fn insert_private_share(
        &self,
        file_path: &str,
        share_type: ShareType,
        share_with: &str,
        permissions: u32,
    ) -> SyncResult<LiveResource<()>> {
        if !share_type.is_private() {
            return Err(ShareSyncError::InvalidArgument(format!(
                "{share_type:?} is not a private share type"
            )));
        }

        Ok(self.insert_share(CreateShareRequest {
            file_path: file_path.to_string(),
            share_type,
            share_with: share_with.to_string(),
            permissions,
            name: String::new(),
            password: String::new(),
            expiration_date: None,
            public_upload: false,
        }))
    }

    /// Creates a public link for `file_path`.
    ///
    /// An empty `password` sets none.
    pub fn insert_public_share(
        &self,
        file_path: &str,
        permissions: u32,
        name: &str,
        password: &str,
        expiration_date: Option<i64>,
        public_upload: bool,
    ) -> LiveResource<()> {
        self.insert_share(CreateShareRequest {
            file_path: file_path.to_string(),
            share_type: ShareType::PublicLink,
            share_with: String::new(),
            permissions,
            name: name.to_string(),
            password: password.to_string(),
            expiration_date,
            public_upload,
        })
    }

    fn insert_share(&self, request: CreateShareRequest) -> LiveResource<()> {
        let scope = Scope::file(&request.file_path, &self.account);
        let account = self.account.clone();
        let local = Arc::clone(&self.local);
        let remote = Arc::clone(&self.remote);

        one_shot(&self.context, scope, "insert_share", move || {
            let created = remote.create_share(&request)?;
            let rows = to_entities(created, &account);
            debug!(file_path = %request.file_path, rows = rows.len(), "share created");
            local.insert(rows)?;
            Ok(())
        })
    }

    /// Changes the permissions of a private share.
    pub fn update_private_share(&self, remote_id: i64, permissions: u32) -> LiveResource<()> {
        self.update_share(UpdateShareRequest::permissions(remote_id, permissions))
    }

    /// Changes a public link.
    pub fn update_public_share(
        &self,
        remote_id: i64,
        name: &str,
        password: Option<&str>,
        expiration_date: Option<i64>,
        permissions: u32,
        public_upload: bool,
    ) -> LiveResource<()> {
        self.update_share(UpdateShareRequest {
            remote_id,
            permissions,
            name: Some(name.to_string()),
            password: password.map(str::to_string),
            expiration_date,
            public_upload: Some(public_upload),
        })
    }

    fn update_share(&self, request: UpdateShareRequest) -> LiveResource<()> {
        let scope = self.scope_of(request.remote_id);
        let account = self.account.clone();
        let local = Arc::clone(&self.local);
        let remote = Arc::clone(&self.remote);

        one_shot(&self.context, scope, "update_share", move || {
            let updated = remote
                .update_share(&request)?
                .into_iter()
                .next()
                .ok_or_else(|| RemoteError::unknown("server returned no share for update"))?;
            local.update(ShareEntity::from_remote_share(updated, &account))?;
            Ok(())
        })
    }

    /// Deletes a share on the server, then locally.
    pub fn delete_share(&self, remote_id: i64) -> LiveResource<()> {
        let scope = self.scope_of(remote_id);
        let local = Arc::clone(&self.local);
        let remote = Arc::clone(&self.remote);

        one_shot(&self.context, scope, "delete_share", move || {
            remote.delete_share(remote_id)?;
            local.delete_share(remote_id)?;
            Ok(())
        })
    }

    /// The file scope of a cached share. An unknown share may belong to any
    /// file being refreshed, so it locks every share of the account.
    fn scope_of(&self, remote_id: i64) -> Scope {
        match self.local.share_live(remote_id).snapshot() {
            Some(share) => Scope::file(share.file_path, share.account_owner),
            None => Scope::shares(self.account.as_str()),
        }
    }
}

fn to_entities(remote: Vec<RemoteShare>, account: &str) -> Vec<ShareEntity> {
    remote
        .into_iter()
        .map(|share| ShareEntity::from_remote_share(share, account))
        .collect()
}

struct FileShares<L, R> {
    file_path: String,
    account: String,
    types: Vec<ShareType>,
    reshares: bool,
    subfiles: bool,
    local: Arc<L>,
    remote: Arc<R>,
}

impl<L, R> CacheStrategy for FileShares<L, R>
where
    L: LocalShareStore + 'static,
    R: RemoteShareSource + 'static,
{
    type Local = Vec<ShareEntity>;
    type Remote = Vec<RemoteShare>;

    fn load_from_local(&self) -> LiveQuery<Vec<ShareEntity>> {
        self.local
            .shares_live(&self.file_path, &self.account, &self.types)
    }

    fn should_refresh(&self, _snapshot: Option<&Vec<ShareEntity>>) -> bool {
        true
    }

    fn fetch_remote(&self) -> RemoteResult<Vec<RemoteShare>> {
        self.remote
            .list_shares(&self.file_path, self.reshares, self.subfiles)
    }

    fn persist(&self, remote: Vec<RemoteShare>) -> StoreResult<()> {
        let rows = to_entities(remote, &self.account);
        if rows.is_empty() {
            debug!(file_path = %self.file_path, "no shares on server, evicting cached ones");
            self.local
                .delete_shares_for_file(&self.file_path, &self.account)?;
        }
        self.local
            .replace_shares(&self.file_path, &self.account, rows)
    }

    fn scope(&self) -> Option<Scope> {
        Some(Scope::file(&self.file_path, &self.account))
    }
}
