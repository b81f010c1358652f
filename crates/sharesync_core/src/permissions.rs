//! Share permission bits.
//!
//! Permissions travel as a bitmask. The presets below are what a client
//! grants by default when it creates a share, depending on the item kind
//! and, for federated shares, on whether the server accepts re-shareable
//! federated shares.

use crate::model::ShareType;

/// The recipient can read.
pub const READ: u32 = 1;
/// The recipient can edit.
pub const UPDATE: u32 = 2;
/// The recipient can create children (folders only).
pub const CREATE: u32 = 4;
/// The recipient can delete children (folders only).
pub const DELETE: u32 = 8;
/// The recipient can re-share.
pub const SHARE: u32 = 16;

/// Everything a file share can grant.
pub const MAXIMUM_PERMISSIONS_FOR_FILE: u32 = READ + UPDATE + SHARE;
/// Everything a folder share can grant.
pub const MAXIMUM_PERMISSIONS_FOR_FOLDER: u32 = MAXIMUM_PERMISSIONS_FOR_FILE + CREATE + DELETE;

/// Federated file share on servers before 9.0.
pub const FEDERATED_PERMISSIONS_FOR_FILE_UP_TO_OC9: u32 = READ + UPDATE;
/// Federated file share on servers from 9.0 on.
pub const FEDERATED_PERMISSIONS_FOR_FILE_AFTER_OC9: u32 = READ + UPDATE + SHARE;
/// Federated folder share on servers before 9.0.
pub const FEDERATED_PERMISSIONS_FOR_FOLDER_UP_TO_OC9: u32 = READ + UPDATE + CREATE + DELETE;
/// Federated folder share on servers from 9.0 on.
pub const FEDERATED_PERMISSIONS_FOR_FOLDER_AFTER_OC9: u32 =
    FEDERATED_PERMISSIONS_FOR_FOLDER_UP_TO_OC9 + SHARE;

/// Returns true if every bit of `flag` is set in `permissions`.
pub fn has(permissions: u32, flag: u32) -> bool {
    permissions & flag == flag
}

/// Default permissions for a new share.
///
/// Items shared with the current user can only be re-shared read-only.
pub fn appropriate_permissions(
    share_type: ShareType,
    is_folder: bool,
    shared_with_me: bool,
    reshareable_federated_supported: bool,
) -> u32 {
    if shared_with_me {
        return READ;
    }

    match (share_type, is_folder, reshareable_federated_supported) {
        (ShareType::Federated, true, true) => FEDERATED_PERMISSIONS_FOR_FOLDER_AFTER_OC9,
        (ShareType::Federated, false, true) => FEDERATED_PERMISSIONS_FOR_FILE_AFTER_OC9,
        (ShareType::Federated, true, false) => FEDERATED_PERMISSIONS_FOR_FOLDER_UP_TO_OC9,
        (ShareType::Federated, false, false) => FEDERATED_PERMISSIONS_FOR_FILE_UP_TO_OC9,
        (_, true, _) => MAXIMUM_PERMISSIONS_FOR_FOLDER,
        (_, false, _) => MAXIMUM_PERMISSIONS_FOR_FILE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_values() {
        assert_eq!(MAXIMUM_PERMISSIONS_FOR_FILE, 19);
        assert_eq!(MAXIMUM_PERMISSIONS_FOR_FOLDER, 31);
        assert_eq!(FEDERATED_PERMISSIONS_FOR_FILE_UP_TO_OC9, 3);
        assert_eq!(FEDERATED_PERMISSIONS_FOR_FILE_AFTER_OC9, 19);
        assert_eq!(FEDERATED_PERMISSIONS_FOR_FOLDER_UP_TO_OC9, 15);
        assert_eq!(FEDERATED_PERMISSIONS_FOR_FOLDER_AFTER_OC9, 31);
    }

    #[test]
    fn shared_with_me_is_read_only() {
        assert_eq!(appropriate_permissions(ShareType::User, true, true, true), READ);
    }

    #[test]
    fn federated_depends_on_server() {
        assert!(!has(
            appropriate_permissions(ShareType::Federated, false, false, false),
            SHARE
        ));
        assert!(has(
            appropriate_permissions(ShareType::Federated, false, false, true),
            SHARE
        ));
        assert_eq!(
            appropriate_permissions(ShareType::Group, true, false, false),
            MAXIMUM_PERMISSIONS_FOR_FOLDER
        );
    }
}
