//! Property tests for scope replacement.

use proptest::prelude::*;
use sharesync_core::{LocalShareStore, ShareEntity, ShareType};
use sharesync_store::InMemoryShareStore;
use std::collections::BTreeSet;

const ACCOUNT: &str = "admin@server";

fn share(remote_id: i64, file_path: &str, account: &str) -> ShareEntity {
    ShareEntity {
        remote_id,
        file_path: file_path.to_string(),
        is_folder: false,
        share_type: ShareType::User,
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

fn ids_strategy() -> impl Strategy<Value = BTreeSet<i64>> {
    prop::collection::btree_set(1i64..500, 0..12)
}

fn scope_ids(store: &InMemoryShareStore, file_path: &str) -> BTreeSet<i64> {
    store
        .all()
        .into_iter()
        .filter(|s| s.in_file_scope(file_path, ACCOUNT))
        .map(|s| s.remote_id)
        .collect()
}

proptest! {
    #[test]
    fn replace_sets_scope_exactly(before in ids_strategy(), after in ids_strategy()) {
        let store =
            InMemoryShareStore::with_shares(before.iter().map(|id| share(*id, "/a", ACCOUNT)));

        let rows = after.iter().map(|id| share(*id, "/a", ACCOUNT)).collect();
        store.replace_shares("/a", ACCOUNT, rows).unwrap();

        prop_assert_eq!(scope_ids(&store, "/a"), after);
    }

    #[test]
    fn replace_leaves_other_scopes(
        other in ids_strategy(),
        after in ids_strategy(),
    ) {
        // Ids of the other scope are shifted so they never collide with the replaced scope.
        let other: BTreeSet<i64> = other.into_iter().map(|id| id + 1_000).collect();
        let store = InMemoryShareStore::with_shares(
            other
                .iter()
                .map(|id| share(*id, "/b", ACCOUNT))
                .chain(other.iter().map(|id| share(*id + 1_000, "/a", "user@server"))),
        );

        let rows = after.iter().map(|id| share(*id, "/a", ACCOUNT)).collect();
        store.replace_shares("/a", ACCOUNT, rows).unwrap();

        prop_assert_eq!(scope_ids(&store, "/b"), other.clone());
        let foreign = store
            .all()
            .into_iter()
            .filter(|s| s.in_file_scope("/a", "user@server"))
            .count();
        prop_assert_eq!(foreign, other.len());
    }

    #[test]
    fn replace_is_idempotent(ids in ids_strategy()) {
        let store = InMemoryShareStore::new();
        let rows: Vec<_> = ids.iter().map(|id| share(*id, "/a", ACCOUNT)).collect();

        store.replace_shares("/a", ACCOUNT, rows.clone()).unwrap();
        let first = store.all();
        store.replace_shares("/a", ACCOUNT, rows).unwrap();

        prop_assert_eq!(store.all(), first);
    }
}
