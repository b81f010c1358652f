//! Sharee search scenarios.

use sharesync_core::{RemoteError, Resource, ResultCode, ShareType};
use sharesync_engine::{EngineContext, ShareeRepository};
use sharesync_testkit::prelude::*;
use std::sync::Arc;

fn setup() -> (Arc<MockShareeSource>, ShareeRepository<MockShareeSource>) {
    init_test_logging("debug");
    let remote = Arc::new(MockShareeSource::new());
    let repository = ShareeRepository::new(Arc::clone(&remote), EngineContext::current());
    (remote, repository)
}

#[tokio::test]
async fn search_preserves_server_order() {
    let (remote, repository) = setup();
    let found = vec![
        sharee("User 2", ShareType::User, "user2", "user2@mail.com"),
        sharee("User 1", ShareType::User, "user1", "user1@mail.com"),
    ];
    remote.set_response(Ok(found.clone()));

    let result = repository.get_sharees("User", 1, 10).await;

    assert_eq!(result, Resource::success(Some(found)));
    assert_eq!(remote.last_search(), Some(("User".to_string(), 1, 10)));
    assert_eq!(remote.calls(), 1);
}

#[tokio::test]
async fn failed_search_has_no_data() {
    let (remote, repository) = setup();
    remote.set_response(Err(RemoteError::rejected(500, "Internal Server Error")));

    let result = repository.get_sharees("User", 2, 10).await;

    assert_eq!(result.code(), Some(ResultCode::ServerError));
    assert_eq!(result.message(), Some("Internal Server Error"));
    assert!(result.data().is_none());
}
