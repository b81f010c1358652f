//! Property-based test generators using proptest.
//!
//! Share lists produced here always carry unique ids, the way the sharing
//! API returns them.

use proptest::prelude::*;
use sharesync_core::{RemoteShare, ShareType};

/// Strategy for generating share types.
pub fn share_type_strategy() -> impl Strategy<Value = ShareType> {
    prop_oneof![
        Just(ShareType::User),
        Just(ShareType::Group),
        Just(ShareType::PublicLink),
        Just(ShareType::Federated),
    ]
}

/// Strategy for generating file paths.
pub fn file_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::string::string_regex("[A-Za-z0-9_]{1,12}").expect("Invalid regex"),
        1..4,
    )
    .prop_map(|segments| format!("/{}", segments.join("/")))
}

/// Strategy for generating account names.
pub fn account_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,8}@[a-z]{1,8}").expect("Invalid regex")
}

/// Strategy for generating a server share record for `path` with id `id`.
pub fn remote_share_strategy(id: i64, path: String) -> impl Strategy<Value = RemoteShare> {
    (
        share_type_strategy(),
        prop::string::string_regex("[a-z]{0,10}").expect("Invalid regex"),
        0u32..32,
        any::<bool>(),
    )
        .prop_map(move |(share_type, recipient, permissions, is_folder)| {
            let public = share_type == ShareType::PublicLink;
            RemoteShare {
                id,
                path: path.clone(),
                is_folder,
                share_type,
                share_with: if public { String::new() } else { recipient.clone() },
                shared_with_display_name: recipient.clone(),
                permissions,
                token: if public { format!("tok{id}") } else { String::new() },
                name: if public { recipient } else { String::new() },
                ..RemoteShare::default()
            }
        })
}

/// Strategy for generating the share list of one file, with unique ids.
pub fn remote_shares_strategy(
    path: String,
    max: usize,
) -> impl Strategy<Value = Vec<RemoteShare>> {
    prop::collection::btree_set(1i64..10_000, 0..=max).prop_flat_map(move |ids| {
        ids.into_iter()
            .map(|id| remote_share_strategy(id, path.clone()))
            .collect::<Vec<_>>()
    })
}
