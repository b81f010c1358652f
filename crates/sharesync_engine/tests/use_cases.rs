//! Use cases over real repositories.

use sharesync_core::{permissions, RemoteError, ResultCode, ShareType};
use sharesync_engine::{
    CapabilityRepository, CreatePrivateShareUseCase, CreatePublicShareUseCase, DeleteShareUseCase,
    EditPrivateShareUseCase, EditPublicShareUseCase, EngineContext, GetPrivateSharesUseCase,
    GetPublicSharesUseCase, RefreshCapabilitiesUseCase, SearchShareesUseCase, ShareRepository,
    ShareeRepository, UseCaseResult,
};
use sharesync_store::{InMemoryCapabilityStore, InMemoryShareStore};
use sharesync_testkit::prelude::*;
use std::sync::Arc;

type Shares = ShareRepository<InMemoryShareStore, MockShareSource>;

fn shares() -> (Arc<MockShareSource>, Arc<Shares>) {
    init_test_logging("debug");
    let remote = Arc::new(MockShareSource::new());
    let repository = ShareRepository::new(
        DEFAULT_ACCOUNT,
        Arc::new(photos_share_store()),
        Arc::clone(&remote),
        EngineContext::current(),
    );
    (remote, Arc::new(repository))
}

#[tokio::test]
async fn get_shares_use_cases_return_refreshed_rows() {
    let (remote, repository) = shares();
    remote.set_list_response(Ok(photos_remote_shares()));

    let private = GetPrivateSharesUseCase::new(Arc::clone(&repository))
        .execute(PHOTOS_PATH)
        .await;
    let public = GetPublicSharesUseCase::new(repository)
        .execute(PHOTOS_PATH)
        .await;

    assert!(private.is_success());
    assert_eq!(private.data().map(Vec::len), Some(2));
    assert_eq!(public.data().map(Vec::len), Some(1));
}

#[tokio::test]
async fn failed_refresh_reports_cached_rows() {
    let (remote, repository) = shares();
    remote.set_list_response(Err(RemoteError::rejected(503, "Service Unavailable")));

    let result = GetPrivateSharesUseCase::new(repository)
        .execute(PHOTOS_PATH)
        .await;

    assert_eq!(result.code(), ResultCode::ServiceUnavailable);
    assert_eq!(result.data().map(Vec::len), Some(2));
}

#[tokio::test]
async fn create_use_cases() {
    let (remote, repository) = shares();
    remote.set_create_response(Ok(vec![remote_private_share(20, PHOTOS_PATH, "work", "Work")]));

    let private = CreatePrivateShareUseCase::new(Arc::clone(&repository))
        .execute(PHOTOS_PATH, ShareType::User, "work", permissions::READ)
        .await;
    assert_eq!(private, UseCaseResult::Success(None));

    let invalid = CreatePrivateShareUseCase::new(Arc::clone(&repository))
        .execute(PHOTOS_PATH, ShareType::PublicLink, "", permissions::READ)
        .await;
    assert_eq!(invalid.code(), ResultCode::InvalidArgument);
    assert_eq!(remote.create_calls(), 1);

    remote.set_create_response(Ok(vec![remote_public_share(21, PHOTOS_PATH, "Link", "l")]));
    let public = CreatePublicShareUseCase::new(Arc::clone(&repository))
        .execute(PHOTOS_PATH, permissions::READ, "Link", "", None, false)
        .await;
    assert!(public.is_success());
    assert!(repository.get_share(21).snapshot().is_some());
}

#[tokio::test]
async fn edit_and_delete_use_cases() {
    let (remote, repository) = shares();
    remote.set_update_response(Err(RemoteError::rejected(403, "Forbidden")));
    remote.set_delete_response(Ok(()));

    let edit = EditPrivateShareUseCase::new(Arc::clone(&repository))
        .execute(1, permissions::READ)
        .await;
    assert_eq!(edit.code(), ResultCode::Forbidden);
    assert_eq!(edit.message(), Some("Forbidden"));

    let edit_link = EditPublicShareUseCase::new(Arc::clone(&repository))
        .execute(3, "Image link", Some("secret"), None, permissions::READ, false)
        .await;
    assert!(edit_link.is_error());

    let delete = DeleteShareUseCase::new(Arc::clone(&repository))
        .execute(3)
        .await;
    assert_eq!(delete, UseCaseResult::Success(None));
    assert!(repository.get_share(3).snapshot().is_none());
}

#[tokio::test]
async fn refresh_capabilities_use_case() {
    init_test_logging("debug");
    let remote = Arc::new(MockCapabilitySource::new());
    remote.set_response(Ok(remote_capability()));
    let repository = CapabilityRepository::new(
        Arc::new(InMemoryCapabilityStore::new()),
        remote,
        EngineContext::current(),
    );

    let result = RefreshCapabilitiesUseCase::new(Arc::new(repository))
        .execute("admin@server")
        .await;

    assert_eq!(result, UseCaseResult::Success(Some(capability("admin@server"))));
}

#[tokio::test]
async fn search_sharees_use_case() {
    init_test_logging("debug");
    let remote = Arc::new(MockShareeSource::new());
    remote.set_response(Ok(vec![sharee("Family", ShareType::Group, "family", "")]));
    let repository = ShareeRepository::new(remote, EngineContext::current());

    let result = SearchShareesUseCase::new(Arc::new(repository))
        .execute("fam", 1, 30)
        .await;

    assert_eq!(result.data().map(Vec::len), Some(1));
}
