//! Share, capability and sharee fixtures.

use sharesync_core::permissions;
use sharesync_core::{
    CapabilityEntity, CapabilityFlag, PublicSharingCapability, RemoteCapability, RemoteShare,
    ServerVersion, ShareEntity, ShareType, Sharee,
};
use sharesync_store::InMemoryShareStore;

/// Account most fixtures belong to.
pub const DEFAULT_ACCOUNT: &str = "admin@server";

/// File most share fixtures point at.
pub const PHOTOS_PATH: &str = "/Photos/image.jpg";

/// Sharing API answer for [`PHOTOS_PATH`]: two private shares and one link.
pub const PHOTOS_SHARES_JSON: &str = r#"[
  {
    "id": 1, "path": "/Photos/image.jpg", "is_folder": false, "share_type": "User",
    "share_with": "work", "shared_with_display_name": "Work",
    "shared_with_additional_info": "work@mail.com", "permissions": 19,
    "shared_date": 1542628397000, "expiration_date": null,
    "token": "", "name": "", "share_link": ""
  },
  {
    "id": 2, "path": "/Photos/image.jpg", "is_folder": false, "share_type": "Group",
    "share_with": "family", "shared_with_display_name": "Family",
    "shared_with_additional_info": null, "permissions": 1,
    "shared_date": 1542628397000, "expiration_date": null,
    "token": "", "name": "", "share_link": ""
  },
  {
    "id": 3, "path": "/Photos/image.jpg", "is_folder": false, "share_type": "PublicLink",
    "share_with": "", "shared_with_display_name": "",
    "shared_with_additional_info": null, "permissions": 1,
    "shared_date": 1542628397000, "expiration_date": 1556575200000,
    "token": "pwdasd12dasdWZ", "name": "Image link",
    "share_link": "http://server:port/s/1"
  }
]"#;

/// Parses [`PHOTOS_SHARES_JSON`].
pub fn photos_remote_shares() -> Vec<RemoteShare> {
    serde_json::from_str(PHOTOS_SHARES_JSON).expect("Invalid share fixture")
}

/// A server record for a user share.
pub fn remote_private_share(
    id: i64,
    path: &str,
    share_with: &str,
    display_name: &str,
) -> RemoteShare {
    RemoteShare {
        id,
        path: path.to_string(),
        share_type: ShareType::User,
        share_with: share_with.to_string(),
        shared_with_display_name: display_name.to_string(),
        permissions: permissions::MAXIMUM_PERMISSIONS_FOR_FILE,
        shared_date: 1_542_628_397_000,
        ..RemoteShare::default()
    }
}

/// A server record for a public link.
pub fn remote_public_share(id: i64, path: &str, name: &str, link: &str) -> RemoteShare {
    RemoteShare {
        id,
        path: path.to_string(),
        share_type: ShareType::PublicLink,
        permissions: permissions::READ,
        shared_date: 1_542_628_397_000,
        token: format!("token{id}"),
        name: name.to_string(),
        share_link: link.to_string(),
        ..RemoteShare::default()
    }
}

/// A cached user share owned by [`DEFAULT_ACCOUNT`].
pub fn private_share(id: i64, path: &str, share_with: &str, display_name: &str) -> ShareEntity {
    ShareEntity::from_remote_share(
        remote_private_share(id, path, share_with, display_name),
        DEFAULT_ACCOUNT,
    )
}

/// A cached public link owned by [`DEFAULT_ACCOUNT`].
pub fn public_share(id: i64, path: &str, name: &str, link: &str) -> ShareEntity {
    ShareEntity::from_remote_share(remote_public_share(id, path, name, link), DEFAULT_ACCOUNT)
}

/// A capabilities document of a 10.x server with sharing enabled.
pub fn remote_capability() -> RemoteCapability {
    RemoteCapability {
        version: ServerVersion {
            major: 10,
            minor: 1,
            micro: 0,
            string: "10.1.0".to_string(),
            edition: "Community".to_string(),
        },
        core_poll_interval: 60,
        sharing_api_enabled: CapabilityFlag::True,
        sharing_search_min_length: 3,
        public: PublicSharingCapability {
            enabled: CapabilityFlag::True,
            expire_date_days: 7,
            upload: CapabilityFlag::True,
            multiple: CapabilityFlag::True,
            supports_upload_only: CapabilityFlag::True,
            ..PublicSharingCapability::default()
        },
        resharing: CapabilityFlag::True,
        federation_outgoing: CapabilityFlag::True,
        federation_incoming: CapabilityFlag::True,
        files_versioning: CapabilityFlag::True,
        ..RemoteCapability::default()
    }
}

/// The cached form of [`remote_capability`] for `account`.
pub fn capability(account: &str) -> CapabilityEntity {
    CapabilityEntity::from_remote_capability(remote_capability(), account)
}

/// A sharee search result.
pub fn sharee(label: &str, share_type: ShareType, share_with: &str, info: &str) -> Sharee {
    Sharee {
        label: label.to_string(),
        share_type,
        share_with: share_with.to_string(),
        additional_info: Some(info.to_string()),
    }
}

/// A share store seeded with [`PHOTOS_SHARES_JSON`] for [`DEFAULT_ACCOUNT`].
///
/// Seeding does not count as writes in the store stats.
pub fn photos_share_store() -> InMemoryShareStore {
    InMemoryShareStore::with_shares(
        photos_remote_shares()
            .into_iter()
            .map(|remote| ShareEntity::from_remote_share(remote, DEFAULT_ACCOUNT)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photos_fixture_parses() {
        let shares = photos_remote_shares();
        assert_eq!(shares.len(), 3);
        assert_eq!(shares[2].share_type, ShareType::PublicLink);
        assert_eq!(shares[2].expiration_date, Some(1_556_575_200_000));
    }

    #[test]
    fn entity_fixtures_are_owned_by_default_account() {
        let share = private_share(1, PHOTOS_PATH, "work", "Work");
        assert!(share.in_file_scope(PHOTOS_PATH, DEFAULT_ACCOUNT));
        assert_eq!(capability("cfo@server").account_owner, "cfo@server");
    }

    #[test]
    fn photos_store_is_seeded() {
        let store = photos_share_store();
        assert_eq!(store.len(), 3);
        assert_eq!(store.stats().writes(), 0);
    }
}
