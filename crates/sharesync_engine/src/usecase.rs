//! Use cases: one repository call each, awaited to its terminal state.

use crate::live::LiveResource;
use crate::repository::{CapabilityRepository, ShareRepository, ShareeRepository};
use sharesync_core::{
    CapabilityEntity, ErrorCause, LocalCapabilityStore, LocalShareStore, RemoteCapabilitySource,
    RemoteShareSource, RemoteShareeSource, Resource, ResultCode, ShareEntity, ShareSyncError,
    ShareType, Sharee,
};
use std::sync::Arc;

/// Outcome of a use case.
#[derive(Debug, Clone, PartialEq)]
pub enum UseCaseResult<T> {
    /// The operation succeeded.
    Success(Option<T>),
    /// The operation failed.
    Error {
        /// Result code.
        code: ResultCode,
        /// Last known data, if any.
        data: Option<T>,
        /// Error message.
        message: Option<String>,
        /// Underlying cause.
        cause: Option<ErrorCause>,
    },
}

impl<T> UseCaseResult<T> {
    /// Reshapes a terminal resource. A `Loading` one reports `Unknown`.
    pub fn from_resource(resource: Resource<T>) -> Self {
        match resource {
            Resource::Success { data } => UseCaseResult::Success(data),
            Resource::Error {
                code,
                data,
                message,
                cause,
            } => UseCaseResult::Error {
                code,
                data,
                message,
                cause,
            },
            Resource::Loading { data } => UseCaseResult::Error {
                code: ResultCode::Unknown,
                data,
                message: Some("operation did not complete".into()),
                cause: None,
            },
        }
    }

    /// Creates an error result without data.
    pub fn from_error(error: &ShareSyncError) -> Self {
        UseCaseResult::Error {
            code: error.code(),
            data: None,
            message: Some(error.message()),
            cause: error.cause(),
        }
    }

    /// Returns true on success.
    pub fn is_success(&self) -> bool {
        matches!(self, UseCaseResult::Success(_))
    }

    /// Returns true on error.
    pub fn is_error(&self) -> bool {
        matches!(self, UseCaseResult::Error { .. })
    }

    /// Gets the data, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            UseCaseResult::Success(data) | UseCaseResult::Error { data, .. } => data.as_ref(),
        }
    }

    /// Gets the result code.
    pub fn code(&self) -> ResultCode {
        match self {
            UseCaseResult::Success(_) => ResultCode::Ok,
            UseCaseResult::Error { code, .. } => *code,
        }
    }

    /// Gets the error message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            UseCaseResult::Success(_) => None,
            UseCaseResult::Error { message, .. } => message.as_deref(),
        }
    }
}

async fn settle<T>(mut live: LiveResource<T>) -> UseCaseResult<T> {
    match live.terminal().await {
        Some(resource) => UseCaseResult::from_resource(resource),
        None => UseCaseResult::Error {
            code: ResultCode::Unknown,
            data: None,
            message: Some("resource closed before completing".into()),
            cause: None,
        },
    }
}

/// Refreshes and returns the private shares of a file.
pub struct GetPrivateSharesUseCase<L, R> {
    repository: Arc<ShareRepository<L, R>>,
}

impl<L, R> GetPrivateSharesUseCase<L, R>
where
    L: LocalShareStore + 'static,
    R: RemoteShareSource + 'static,
{
    /// Creates the use case.
    pub fn new(repository: Arc<ShareRepository<L, R>>) -> Self {
        Self { repository }
    }

    /// Runs the use case.
    pub async fn execute(&self, file_path: &str) -> UseCaseResult<Vec<ShareEntity>> {
        settle(self.repository.get_private_shares(file_path)).await
    }
}

/// Refreshes and returns the public links of a file.
pub struct GetPublicSharesUseCase<L, R> {
    repository: Arc<ShareRepository<L, R>>,
}

impl<L, R> GetPublicSharesUseCase<L, R>
where
    L: LocalShareStore + 'static,
    R: RemoteShareSource + 'static,
{
    /// Creates the use case.
    pub fn new(repository: Arc<ShareRepository<L, R>>) -> Self {
        Self { repository }
    }

    /// Runs the use case.
    pub async fn execute(&self, file_path: &str) -> UseCaseResult<Vec<ShareEntity>> {
        settle(self.repository.get_public_shares(file_path)).await
    }
}

/// Shares a file with a user, group or federated recipient.
pub struct CreatePrivateShareUseCase<L, R> {
    repository: Arc<ShareRepository<L, R>>,
}

impl<L, R> CreatePrivateShareUseCase<L, R>
where
    L: LocalShareStore + 'static,
    R: RemoteShareSource + 'static,
{
    /// Creates the use case.
    pub fn new(repository: Arc<ShareRepository<L, R>>) -> Self {
        Self { repository }
    }

    /// Runs the use case.
    pub async fn execute(
        &self,
        file_path: &str,
        share_type: ShareType,
        share_with: &str,
        permissions: u32,
    ) -> UseCaseResult<()> {
        match self
            .repository
            .insert_private_share(file_path, share_type, share_with, permissions)
        {
            Ok(live) => settle(live).await,
            Err(err) => UseCaseResult::from_error(&err),
        }
    }
}

/// Creates a public link for a file.
pub struct CreatePublicShareUseCase<L, R> {
    repository: Arc<ShareRepository<L, R>>,
}

impl<L, R> CreatePublicShareUseCase<L, R>
where
    L: LocalShareStore + 'static,
    R: RemoteShareSource + 'static,
{
    /// Creates the use case.
    pub fn new(repository: Arc<ShareRepository<L, R>>) -> Self {
        Self { repository }
    }

    /// Runs the use case.
    pub async fn execute(
        &self,
        file_path: &str,
        permissions: u32,
        name: &str,
        password: &str,
        expiration_date: Option<i64>,
        public_upload: bool,
    ) -> UseCaseResult<()> {
        settle(self.repository.insert_public_share(
            file_path,
            permissions,
            name,
            password,
            expiration_date,
            public_upload,
        ))
        .await
    }
}

/// Changes the permissions of a private share.
pub struct EditPrivateShareUseCase<L, R> {
    repository: Arc<ShareRepository<L, R>>,
}

impl<L, R> EditPrivateShareUseCase<L, R>
where
    L: LocalShareStore + 'static,
    R: RemoteShareSource + 'static,
{
    /// Creates the use case.
    pub fn new(repository: Arc<ShareRepository<L, R>>) -> Self {
        Self { repository }
    }

    /// Runs the use case.
    pub async fn execute(&self, remote_id: i64, permissions: u32) -> UseCaseResult<()> {
        settle(self.repository.update_private_share(remote_id, permissions)).await
    }
}

/// Changes a public link.
pub struct EditPublicShareUseCase<L, R> {
    repository: Arc<ShareRepository<L, R>>,
}

impl<L, R> EditPublicShareUseCase<L, R>
where
    L: LocalShareStore + 'static,
    R: RemoteShareSource + 'static,
{
    /// Creates the use case.
    pub fn new(repository: Arc<ShareRepository<L, R>>) -> Self {
        Self { repository }
    }

    /// Runs the use case.
    pub async fn execute(
        &self,
        remote_id: i64,
        name: &str,
        password: Option<&str>,
        expiration_date: Option<i64>,
        permissions: u32,
        public_upload: bool,
    ) -> UseCaseResult<()> {
        settle(self.repository.update_public_share(
            remote_id,
            name,
            password,
            expiration_date,
            permissions,
            public_upload,
        ))
        .await
    }
}

/// Deletes a share.
pub struct DeleteShareUseCase<L, R> {
    repository: Arc<ShareRepository<L, R>>,
}

impl<L, R> DeleteShareUseCase<L, R>
where
    L: LocalShareStore + 'static,
    R: RemoteShareSource + 'static,
{
    /// Creates the use case.
    pub fn new(repository: Arc<ShareRepository<L, R>>) -> Self {
        Self { repository }
    }

    /// Runs the use case.
    pub async fn execute(&self, remote_id: i64) -> UseCaseResult<()> {
        settle(self.repository.delete_share(remote_id)).await
    }
}

/// Refreshes the capabilities of an account from the server.
pub struct RefreshCapabilitiesUseCase<L, R> {
    repository: Arc<CapabilityRepository<L, R>>,
}

impl<L, R> RefreshCapabilitiesUseCase<L, R>
where
    L: LocalCapabilityStore + 'static,
    R: RemoteCapabilitySource + 'static,
{
    /// Creates the use case.
    pub fn new(repository: Arc<CapabilityRepository<L, R>>) -> Self {
        Self { repository }
    }

    /// Runs the use case.
    pub async fn execute(&self, account: &str) -> UseCaseResult<CapabilityEntity> {
        settle(self.repository.get_capability_for_account(account, true)).await
    }
}

/// Searches share recipients.
pub struct SearchShareesUseCase<R> {
    repository: Arc<ShareeRepository<R>>,
}

impl<R: RemoteShareeSource + 'static> SearchShareesUseCase<R> {
    /// Creates the use case.
    pub fn new(repository: Arc<ShareeRepository<R>>) -> Self {
        Self { repository }
    }

    /// Runs the use case.
    pub async fn execute(
        &self,
        search: &str,
        page: u32,
        per_page: u32,
    ) -> UseCaseResult<Vec<Sharee>> {
        UseCaseResult::from_resource(self.repository.get_sharees(search, page, per_page).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_resources_reshape() {
        assert_eq!(
            UseCaseResult::from_resource(Resource::success(Some(3))),
            UseCaseResult::Success(Some(3))
        );

        let error = UseCaseResult::from_resource(Resource::error(
            ResultCode::Forbidden,
            Some(1),
            Some("Forbidden".into()),
            None,
        ));
        assert!(error.is_error());
        assert_eq!(error.code(), ResultCode::Forbidden);
        assert_eq!(error.data(), Some(&1));
        assert_eq!(error.message(), Some("Forbidden"));
    }

    #[test]
    fn loading_is_not_a_result() {
        let result = UseCaseResult::from_resource(Resource::loading(Some(1)));
        assert_eq!(result.code(), ResultCode::Unknown);
    }

    #[test]
    fn invalid_argument_has_no_data() {
        let result =
            UseCaseResult::<()>::from_error(&ShareSyncError::InvalidArgument("bad type".into()));
        assert_eq!(result.code(), ResultCode::InvalidArgument);
        assert!(result.data().is_none());
    }
}
