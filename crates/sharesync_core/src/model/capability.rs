//! Server capability rows.

use crate::remote::RemoteCapability;
use serde::{Deserialize, Serialize};

/// Tri-state capability value as reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapabilityFlag {
    /// The server did not report the capability.
    #[default]
    Unknown,
    /// Reported as disabled.
    False,
    /// Reported as enabled.
    True,
}

impl CapabilityFlag {
    /// Parses the server's `-1 / 0 / 1` encoding.
    pub fn from_value(value: i32) -> Self {
        match value {
            0 => CapabilityFlag::False,
            1 => CapabilityFlag::True,
            _ => CapabilityFlag::Unknown,
        }
    }

    /// Returns the server's integer encoding.
    pub fn value(self) -> i32 {
        match self {
            CapabilityFlag::Unknown => -1,
            CapabilityFlag::False => 0,
            CapabilityFlag::True => 1,
        }
    }

    /// Returns true only when explicitly enabled.
    pub fn is_true(self) -> bool {
        self == CapabilityFlag::True
    }
}

impl From<bool> for CapabilityFlag {
    fn from(value: bool) -> Self {
        if value {
            CapabilityFlag::True
        } else {
            CapabilityFlag::False
        }
    }
}

/// Server version as reported in the capabilities document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
    /// Micro version.
    pub micro: u32,
    /// Full version string.
    pub string: String,
    /// Edition name.
    pub edition: String,
}

impl ServerVersion {
    /// Servers from 9.0 on accept federated shares without the share bit.
    pub fn supports_reshareable_federated(&self) -> bool {
        self.major >= 9
    }
}

/// Public-link sharing capabilities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicSharingCapability {
    /// Public links are enabled.
    pub enabled: CapabilityFlag,
    /// A password is always required.
    pub password_enforced: CapabilityFlag,
    /// A password is required for read-only links.
    pub password_enforced_read_only: CapabilityFlag,
    /// A password is required for read-write links.
    pub password_enforced_read_write: CapabilityFlag,
    /// A password is required for upload-only links.
    pub password_enforced_upload_only: CapabilityFlag,
    /// Expiration dates are supported.
    pub expire_date_enabled: CapabilityFlag,
    /// Default expiration in days.
    pub expire_date_days: u32,
    /// An expiration date is required.
    pub expire_date_enforced: CapabilityFlag,
    /// Links can be sent by mail.
    pub send_mail: CapabilityFlag,
    /// Uploads through links are allowed.
    pub upload: CapabilityFlag,
    /// More than one link per file is allowed.
    pub multiple: CapabilityFlag,
    /// Upload-only (file drop) links are supported.
    pub supports_upload_only: CapabilityFlag,
}

/// Cached capabilities of the server an account lives on.
///
/// One row per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityEntity {
    /// Account this row belongs to.
    pub account_owner: String,
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

impl CapabilityEntity {
    /// Maps a server capabilities document to the row of `account`.
    pub fn from_remote_capability(remote: RemoteCapability, account: &str) -> Self {
        Self {
            account_owner: account.to_string(),
            version: remote.version,
            core_poll_interval: remote.core_poll_interval,
            sharing_api_enabled: remote.sharing_api_enabled,
            sharing_search_min_length: remote.sharing_search_min_length,
            public: remote.public,
            user_send_mail: remote.user_send_mail,
            resharing: remote.resharing,
            federation_outgoing: remote.federation_outgoing,
            federation_incoming: remote.federation_incoming,
            files_big_file_chunking: remote.files_big_file_chunking,
            files_undelete: remote.files_undelete,
            files_versioning: remote.files_versioning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_encoding() {
        assert_eq!(CapabilityFlag::from_value(1), CapabilityFlag::True);
        assert_eq!(CapabilityFlag::from_value(0), CapabilityFlag::False);
        assert_eq!(CapabilityFlag::from_value(-1), CapabilityFlag::Unknown);
        assert_eq!(CapabilityFlag::from_value(42), CapabilityFlag::Unknown);
        assert_eq!(CapabilityFlag::from(true).value(), 1);
        assert!(!CapabilityFlag::Unknown.is_true());
    }

    #[test]
    fn reshareable_federated_threshold() {
        let mut version = ServerVersion {
            major: 8,
            minor: 2,
            ..ServerVersion::default()
        };
        assert!(!version.supports_reshareable_federated());
        version.major = 10;
        assert!(version.supports_reshareable_federated());
    }

    #[test]
    fn remote_capability_mapping() {
        let remote = RemoteCapability {
            sharing_api_enabled: CapabilityFlag::True,
            sharing_search_min_length: 3,
            ..RemoteCapability::default()
        };
        let entity = CapabilityEntity::from_remote_capability(remote, "admin@server");
        assert_eq!(entity.account_owner, "admin@server");
        assert!(entity.sharing_api_enabled.is_true());
        assert_eq!(entity.sharing_search_min_length, 3);
    }
}
