//! Remote source contracts.
//!
//! The transport (HTTP client, OCS parsing) lives behind these traits.
//! Calls are blocking; the engine always runs them off the observing context.

use crate::error::RemoteResult;
use crate::model::{CapabilityFlag, PublicSharingCapability, ServerVersion, ShareType, Sharee};
use serde::{Deserialize, Serialize};

/// A share record as returned by the sharing API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteShare {
    /// Server-side share id.
    pub id: i64,
    /// Path of the shared item.
    pub path: String,
    /// Whether the shared item is a folder.
    pub is_folder: bool,
    /// Recipient kind.
    pub share_type: ShareType,
    /// Recipient name.
    pub share_with: String,
    /// Recipient display name.
    pub shared_with_display_name: String,
    /// Extra recipient detail.
    pub shared_with_additional_info: Option<String>,
    /// Permission bitmask.
    pub permissions: u32,
    /// Creation time, milliseconds since the epoch.
    pub shared_date: i64,
    /// Expiration time, milliseconds since the epoch.
    pub expiration_date: Option<i64>,
    /// Public link token.
    pub token: String,
    /// Public link name.
    pub name: String,
    /// Public link URL.
    pub share_link: String,
}

impl Default for RemoteShare {
    fn default() -> Self {
        Self {
            id: 0,
            path: String::new(),
            is_folder: false,
            share_type: ShareType::User,
            share_with: String::new(),
            shared_with_display_name: String::new(),
            shared_with_additional_info: None,
            permissions: 0,
            shared_date: 0,
            expiration_date: None,
            token: String::new(),
            name: String::new(),
            share_link: String::new(),
        }
    }
}

/// A capabilities document as returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCapability {
    /// Server version.
    pub version: ServerVersion,
    /// Suggested polling interval, in seconds.
    pub core_poll_interval: u32,
    /// The sharing API is available.
    pub sharing_api_enabled: CapabilityFlag,
    /// Minimum length of a sharee search term.
    pub sharing_search_min_length: u32,
    /// Public-link capabilities.
    pub public: PublicSharingCapability,
    /// Users can be notified by mail.
    pub user_send_mail: CapabilityFlag,
    /// Re-sharing is allowed.
    pub resharing: CapabilityFlag,
    /// Outgoing federated shares are allowed.
    pub federation_outgoing: CapabilityFlag,
    /// Incoming federated shares are allowed.
    pub federation_incoming: CapabilityFlag,
    /// Chunked uploads of big files are supported.
    pub files_big_file_chunking: CapabilityFlag,
    /// The trash bin is available.
    pub files_undelete: CapabilityFlag,
    /// File versions are available.
    pub files_versioning: CapabilityFlag,
}

/// Parameters of a create-share call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateShareRequest {
    /// Path of the item to share.
    pub file_path: String,
    /// Recipient kind.
    pub share_type: ShareType,
    /// Recipient name. Empty for public links.
    pub share_with: String,
    /// Permission bitmask.
    pub permissions: u32,
    /// Link name. Empty for private shares.
    pub name: String,
    /// Link password. Empty for none.
    pub password: String,
    /// Expiration time, milliseconds since the epoch.
    pub expiration_date: Option<i64>,
    /// Whether uploads through the link are allowed.
    pub public_upload: bool,
}

/// Parameters of an update-share call. `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateShareRequest {
    /// Server-side share id.
    pub remote_id: i64,
    /// New permission bitmask.
    pub permissions: u32,
    /// New link name.
    pub name: Option<String>,
    /// New link password.
    pub password: Option<String>,
    /// New expiration time, milliseconds since the epoch.
    pub expiration_date: Option<i64>,
    /// New upload permission for the link.
    pub public_upload: Option<bool>,
}

impl UpdateShareRequest {
    /// Creates a request that changes only the permissions.
    pub fn permissions(remote_id: i64, permissions: u32) -> Self {
        Self {
            remote_id,
            permissions,
            name: None,
            password: None,
            expiration_date: None,
            public_upload: None,
        }
    }
}

/// Share calls against the sharing API.
pub trait RemoteShareSource: Send + Sync {
    /// Lists the shares of `file_path`.
    fn list_shares(
        &self,
        file_path: &str,
        reshares: bool,
        subfiles: bool,
    ) -> RemoteResult<Vec<RemoteShare>>;

    /// Creates a share and returns the created record(s).
    fn create_share(&self, request: &CreateShareRequest) -> RemoteResult<Vec<RemoteShare>>;

    /// Updates a share and returns the updated record(s).
    fn update_share(&self, request: &UpdateShareRequest) -> RemoteResult<Vec<RemoteShare>>;

    /// Deletes a share.
    fn delete_share(&self, remote_id: i64) -> RemoteResult<()>;
}

/// Capability calls against the server.
pub trait RemoteCapabilitySource: Send + Sync {
    /// Fetches the capabilities document for `account`.
    fn get_capabilities(&self, account: &str) -> RemoteResult<RemoteCapability>;
}

/// Sharee search against the sharing API.
pub trait RemoteShareeSource: Send + Sync {
    /// Searches recipients matching `search`; `page` is 1-based.
    fn search_sharees(&self, search: &str, page: u32, per_page: u32) -> RemoteResult<Vec<Sharee>>;
}
