//! Share rows.

use crate::remote::RemoteShare;
use serde::{Deserialize, Serialize};

/// Kind of share recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShareType {
    /// A user on the same server.
    User,
    /// A group on the same server.
    Group,
    /// A public link.
    PublicLink,
    /// A user on another server.
    Federated,
}

impl ShareType {
    /// Share types addressed to a recipient rather than exposed by link.
    pub const PRIVATE: [ShareType; 3] = [ShareType::User, ShareType::Group, ShareType::Federated];

    /// Share types exposed by link.
    pub const PUBLIC: [ShareType; 1] = [ShareType::PublicLink];

    /// Returns the integer the sharing API uses for this type.
    pub fn value(self) -> i32 {
        match self {
            ShareType::User => 0,
            ShareType::Group => 1,
            ShareType::PublicLink => 3,
            ShareType::Federated => 6,
        }
    }

    /// Parses the sharing API integer.
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(ShareType::User),
            1 => Some(ShareType::Group),
            3 => Some(ShareType::PublicLink),
            6 => Some(ShareType::Federated),
            _ => None,
        }
    }

    /// Returns true for user, group and federated shares.
    pub fn is_private(self) -> bool {
        Self::PRIVATE.contains(&self)
    }
}

/// A cached share.
///
/// Identity is `remote_id`; rows are looked up per `(file_path, account_owner)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareEntity {
    /// Server-side share id.
    pub remote_id: i64,
    /// Path of the shared file or folder.
    pub file_path: String,
    /// Whether the shared item is a folder.
    pub is_folder: bool,
    /// Recipient kind.
    pub share_type: ShareType,
    /// Recipient name (user, group or federated id). Empty for links.
    pub share_with: String,
    /// Display name of the recipient.
    pub shared_with_display_name: String,
    /// Extra recipient detail, usually an e-mail.
    pub shared_with_additional_info: Option<String>,
    /// Permission bitmask, see [`permissions`](crate::permissions).
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
    /// Account this row belongs to.
    pub account_owner: String,
}

impl ShareEntity {
    /// Maps a server record to a row owned by `account`.
    pub fn from_remote_share(remote: RemoteShare, account: &str) -> Self {
        Self {
            remote_id: remote.id,
            file_path: remote.path,
            is_folder: remote.is_folder,
            share_type: remote.share_type,
            share_with: remote.share_with,
            shared_with_display_name: remote.shared_with_display_name,
            shared_with_additional_info: remote.shared_with_additional_info,
            permissions: remote.permissions,
            shared_date: remote.shared_date,
            expiration_date: remote.expiration_date,
            token: remote.token,
            name: remote.name,
            share_link: remote.share_link,
            account_owner: account.to_string(),
        }
    }

    /// Returns true if this row belongs to the `(file_path, account)` scope.
    pub fn in_file_scope(&self, file_path: &str, account: &str) -> bool {
        self.file_path == file_path && self.account_owner == account
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_type_wire_values() {
        for share_type in [
            ShareType::User,
            ShareType::Group,
            ShareType::PublicLink,
            ShareType::Federated,
        ] {
            assert_eq!(ShareType::from_value(share_type.value()), Some(share_type));
        }
        assert_eq!(ShareType::from_value(4), None);
        assert!(!ShareType::PublicLink.is_private());
        assert!(ShareType::Federated.is_private());
    }

    #[test]
    fn remote_share_is_stamped_with_account() {
        let remote = RemoteShare {
            id: 7,
            path: "/Photos/image.jpg".into(),
            share_type: ShareType::User,
            share_with: "work".into(),
            shared_with_display_name: "Work".into(),
            permissions: 1,
            ..RemoteShare::default()
        };

        let entity = ShareEntity::from_remote_share(remote, "admin@server");
        assert_eq!(entity.remote_id, 7);
        assert_eq!(entity.account_owner, "admin@server");
        assert!(entity.in_file_scope("/Photos/image.jpg", "admin@server"));
        assert!(!entity.in_file_scope("/Photos/image.jpg", "user@server"));
    }
}
