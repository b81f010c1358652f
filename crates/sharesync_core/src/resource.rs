//! The Loading / Success / Error container emitted by repositories.

use crate::error::{ErrorCause, ResultCode, ShareSyncError};

/// Discriminant of a [`Resource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// A request is in flight.
    Loading,
    /// The request completed.
    Success,
    /// The request failed.
    Error,
}

/// A value in flight, delivered, or failed.
///
/// `Loading` carries the best-known cached snapshot while a refresh runs.
/// `Error` may still carry data: the last known good cache value, so a
/// caller can keep rendering stale content next to the failure notice.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    /// A refresh is running; `data` is the current cache snapshot.
    Loading {
        /// Cached snapshot, if one exists.
        data: Option<T>,
    },
    /// The refresh (or operation) completed.
    Success {
        /// Delivered data.
        data: Option<T>,
    },
    /// The refresh (or operation) failed.
    Error {
        /// Outcome code of the failure.
        code: ResultCode,
        /// Last known cached data.
        data: Option<T>,
        /// Server phrase or error message.
        message: Option<String>,
        /// Underlying cause.
        cause: Option<ErrorCause>,
    },
}

impl<T> Resource<T> {
    /// Creates a loading resource.
    pub fn loading(data: Option<T>) -> Self {
        Resource::Loading { data }
    }

    /// Creates a success resource.
    pub fn success(data: Option<T>) -> Self {
        Resource::Success { data }
    }

    /// Creates an error resource.
    pub fn error(
        code: ResultCode,
        data: Option<T>,
        message: Option<String>,
        cause: Option<ErrorCause>,
    ) -> Self {
        Resource::Error {
            code,
            data,
            message,
            cause,
        }
    }

    /// Creates an error resource from a repository error, attaching `data`.
    pub fn from_error(error: &ShareSyncError, data: Option<T>) -> Self {
        Resource::Error {
            code: error.code(),
            data,
            message: Some(error.message()),
            cause: error.cause(),
        }
    }

    /// Returns the status.
    pub fn status(&self) -> Status {
        match self {
            Resource::Loading { .. } => Status::Loading,
            Resource::Success { .. } => Status::Success,
            Resource::Error { .. } => Status::Error,
        }
    }

    /// Returns the carried data.
    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Loading { data }
            | Resource::Success { data }
            | Resource::Error { data, .. } => data.as_ref(),
        }
    }

    /// Consumes the resource and returns its data.
    pub fn into_data(self) -> Option<T> {
        match self {
            Resource::Loading { data }
            | Resource::Success { data }
            | Resource::Error { data, .. } => data,
        }
    }

    /// Returns the error code, if this is an error.
    pub fn code(&self) -> Option<ResultCode> {
        match self {
            Resource::Error { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns the error message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Resource::Error { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Returns the error cause, if any.
    pub fn cause(&self) -> Option<&ErrorCause> {
        match self {
            Resource::Error { cause, .. } => cause.as_ref(),
            _ => None,
        }
    }

    /// Returns true while loading.
    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading { .. })
    }

    /// Returns true on success.
    pub fn is_success(&self) -> bool {
        matches!(self, Resource::Success { .. })
    }

    /// Returns true on error.
    pub fn is_error(&self) -> bool {
        matches!(self, Resource::Error { .. })
    }

    /// Returns true for Success and Error.
    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    /// Maps the carried data, keeping status and error details.
    pub fn map<U, F>(self, f: F) -> Resource<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Resource::Loading { data } => Resource::Loading { data: data.map(f) },
            Resource::Success { data } => Resource::Success { data: data.map(f) },
            Resource::Error {
                code,
                data,
                message,
                cause,
            } => Resource::Error {
                code,
                data: data.map(f),
                message,
                cause,
            },
        }
    }
}
