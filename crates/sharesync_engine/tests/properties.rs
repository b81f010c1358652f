//! Property tests for the refresh outcome.

use proptest::prelude::*;
use sharesync_core::{LocalShareStore, RemoteError, RemoteShare, ShareEntity, ShareType};
use sharesync_engine::{EngineConfig, EngineContext, ShareRepository, TaskExecutor};
use sharesync_store::InMemoryShareStore;
use sharesync_testkit::prelude::*;
use std::sync::Arc;
use tokio::runtime::Runtime;

const PATH: &str = "/Photos/image.jpg";

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn entities(remote: &[RemoteShare]) -> Vec<ShareEntity> {
    remote
        .iter()
        .cloned()
        .map(|share| ShareEntity::from_remote_share(share, DEFAULT_ACCOUNT))
        .collect()
}

fn seeded(cached: &[RemoteShare]) -> Arc<InMemoryShareStore> {
    let mut rows = entities(cached);
    // Another file's shares; ids far from the generated ones.
    rows.push(private_share(50_000, "/Other/file.txt", "work", "Work"));
    Arc::new(InMemoryShareStore::with_shares(rows))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn success_equals_remote_scope(
        cached in remote_shares_strategy(PATH.to_string(), 6),
        answer in remote_shares_strategy(PATH.to_string(), 6),
    ) {
        let rt = runtime();
        let store = seeded(&cached);
        let remote = Arc::new(MockShareSource::new());
        remote.set_list_response(Ok(answer.clone()));

        let terminal = rt.block_on(async {
            let repository = ShareRepository::new(
                DEFAULT_ACCOUNT,
                Arc::clone(&store),
                Arc::clone(&remote),
                EngineContext::new(TaskExecutor::current(), EngineConfig::default()),
            );
            let mut live = repository.get_private_shares(PATH);
            assert!(live.try_recv().unwrap().is_loading());
            live.terminal().await.unwrap()
        });

        let mut expected: Vec<_> = entities(&answer)
            .into_iter()
            .filter(|s| s.share_type.is_private())
            .collect();
        expected.sort_by_key(|s| s.remote_id);

        prop_assert_eq!(terminal.into_data(), Some(expected.clone()));
        prop_assert_eq!(
            store.shares_live(PATH, DEFAULT_ACCOUNT, &ShareType::PRIVATE).snapshot(),
            Some(expected)
        );
        prop_assert!(store.all().iter().any(|s| s.remote_id == 50_000));
    }

    #[test]
    fn failure_keeps_pre_fetch_snapshot(cached in remote_shares_strategy(PATH.to_string(), 6)) {
        let rt = runtime();
        let store = seeded(&cached);
        let before = store.all();
        let remote = Arc::new(MockShareSource::new());
        remote.set_list_response(Err(RemoteError::rejected(500, "Internal Server Error")));

        let pre_fetch = store
            .shares_live(PATH, DEFAULT_ACCOUNT, &ShareType::PUBLIC)
            .snapshot();

        let terminal = rt.block_on(async {
            let repository = ShareRepository::new(
                DEFAULT_ACCOUNT,
                Arc::clone(&store),
                Arc::clone(&remote),
                EngineContext::new(TaskExecutor::current(), EngineConfig::default()),
            );
            repository.get_public_shares(PATH).terminal().await.unwrap()
        });

        prop_assert!(terminal.is_error());
        prop_assert_eq!(terminal.into_data(), pre_fetch);
        prop_assert_eq!(store.all(), before);
    }
}
