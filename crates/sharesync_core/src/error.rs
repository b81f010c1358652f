//! Error types shared by stores, remote sources and repositories.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote calls.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Result type for local store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type for repository-level operations.
pub type SyncResult<T> = Result<T, ShareSyncError>;

/// Coarse outcome code attached to an error [`Resource`](crate::Resource).
///
/// Derived from the HTTP status of a failed remote call where one exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    /// The call succeeded.
    Ok,
    /// The caller passed an argument the operation does not accept.
    InvalidArgument,
    /// The server could not be reached.
    NoNetworkConnection,
    /// The request timed out (408 / 504).
    Timeout,
    /// Credentials were rejected (401).
    Unauthorized,
    /// The server refused the operation (403).
    Forbidden,
    /// The target does not exist on the server (404).
    NotFound,
    /// The request conflicts with server state (409).
    Conflict,
    /// The server is in maintenance or overloaded (503).
    ServiceUnavailable,
    /// Any other 5xx answer.
    ServerError,
    /// Any other non-success HTTP status.
    HttpError(u16),
    /// No status information is available.
    Unknown,
}

impl ResultCode {
    /// Maps an HTTP status code to a result code.
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => ResultCode::Ok,
            401 => ResultCode::Unauthorized,
            403 => ResultCode::Forbidden,
            404 => ResultCode::NotFound,
            408 | 504 => ResultCode::Timeout,
            409 => ResultCode::Conflict,
            503 => ResultCode::ServiceUnavailable,
            500..=599 => ResultCode::ServerError,
            other => ResultCode::HttpError(other),
        }
    }
}

/// A shareable, comparable wrapper around the underlying cause of a failure.
///
/// Two causes are equal when they render the same message, which keeps
/// [`Resource`](crate::Resource) structurally comparable.
#[derive(Clone)]
pub struct ErrorCause(Arc<dyn std::error::Error + Send + Sync>);

impl ErrorCause {
    /// Wraps an arbitrary error.
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(Arc::new(error))
    }

    /// Creates a cause from a bare message.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self::new(MessageError(message.into()))
    }

    /// Returns the wrapped error.
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

impl fmt::Debug for ErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErrorCause").field(&self.0.to_string()).finish()
    }
}

impl fmt::Display for ErrorCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl PartialEq for ErrorCause {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.to_string() == other.0.to_string()
    }
}

impl std::error::Error for ErrorCause {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
struct MessageError(String);

/// Failure of a call against the server API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RemoteError {
    /// Transport-level failure: connection refused, DNS, TLS, timeout.
    #[error("network failure: {phrase}")]
    Network {
        /// HTTP status when the transport got that far.
        status: Option<u16>,
        /// Status phrase or transport message.
        phrase: String,
        /// Underlying error.
        #[source]
        cause: Option<ErrorCause>,
    },

    /// The server answered with a non-success application response.
    #[error("server rejected request ({status}): {phrase}")]
    ServerRejected {
        /// HTTP status code.
        status: u16,
        /// HTTP status phrase.
        phrase: String,
        /// Underlying error.
        #[source]
        cause: Option<ErrorCause>,
    },

    /// A wrapped exception without status information.
    #[error("remote call failed: {message}")]
    Unknown {
        /// Error message.
        message: String,
        /// Underlying error.
        #[source]
        cause: Option<ErrorCause>,
    },
}

impl RemoteError {
    /// Creates a network failure without an HTTP status.
    pub fn network(phrase: impl Into<String>) -> Self {
        Self::Network {
            status: None,
            phrase: phrase.into(),
            cause: None,
        }
    }

    /// Creates a network failure that carries an HTTP status.
    pub fn network_status(status: u16, phrase: impl Into<String>) -> Self {
        Self::Network {
            status: Some(status),
            phrase: phrase.into(),
            cause: None,
        }
    }

    /// Creates a server rejection.
    pub fn rejected(status: u16, phrase: impl Into<String>) -> Self {
        Self::ServerRejected {
            status,
            phrase: phrase.into(),
            cause: None,
        }
    }

    /// Creates an error with no status information.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
            cause: None,
        }
    }

    /// Attaches an underlying cause.
    pub fn with_cause(mut self, error: ErrorCause) -> Self {
        match &mut self {
            Self::Network { cause, .. }
            | Self::ServerRejected { cause, .. }
            | Self::Unknown { cause, .. } => *cause = Some(error),
        }
        self
    }

    /// Returns the HTTP status, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network { status, .. } => *status,
            Self::ServerRejected { status, .. } => Some(*status),
            Self::Unknown { .. } => None,
        }
    }

    /// Returns the status phrase or message.
    pub fn phrase(&self) -> &str {
        match self {
            Self::Network { phrase, .. } | Self::ServerRejected { phrase, .. } => phrase,
            Self::Unknown { message, .. } => message,
        }
    }

    /// Returns the underlying cause, if any.
    pub fn cause(&self) -> Option<&ErrorCause> {
        match self {
            Self::Network { cause, .. }
            | Self::ServerRejected { cause, .. }
            | Self::Unknown { cause, .. } => cause.as_ref(),
        }
    }

    /// Returns the result code for this failure.
    pub fn code(&self) -> ResultCode {
        match self {
            Self::Network {
                status: Some(status),
                ..
            } => ResultCode::from_status(*status),
            Self::Network { status: None, .. } => ResultCode::NoNetworkConnection,
            Self::ServerRejected { status, .. } => ResultCode::from_status(*status),
            Self::Unknown { .. } => ResultCode::Unknown,
        }
    }

    /// Returns true if repeating the call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::ServerRejected { status, .. } => matches!(status, 408 | 429 | 502..=504),
            Self::Unknown { .. } => false,
        }
    }
}

/// Failure of a local store operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The store has been closed.
    #[error("local store is closed")]
    Closed,

    /// No row matched the given key.
    #[error("no cached row for {0}")]
    NotFound(String),

    /// Backend-specific failure.
    #[error("local store failure: {0}")]
    Backend(String),
}

/// Errors surfaced by repositories and the sync engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShareSyncError {
    /// The caller passed an argument the operation does not accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A remote call failed.
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A local store write failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ShareSyncError {
    /// Returns the result code for this error.
    pub fn code(&self) -> ResultCode {
        match self {
            Self::InvalidArgument(_) => ResultCode::InvalidArgument,
            Self::Remote(err) => err.code(),
            Self::Store(_) => ResultCode::Unknown,
        }
    }

    /// Returns the user-facing message: the HTTP phrase for remote failures.
    pub fn message(&self) -> String {
        match self {
            Self::Remote(err) => err.phrase().to_string(),
            other => other.to_string(),
        }
    }

    /// Returns the underlying cause to attach to an error resource.
    pub fn cause(&self) -> Option<ErrorCause> {
        match self {
            Self::Remote(err) => err.cause().cloned(),
            Self::Store(err) => Some(ErrorCause::new(err.clone())),
            Self::InvalidArgument(_) => None,
        }
    }
}
