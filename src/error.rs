//! Error types for the filesystem abstraction
//!
//! Two layers of errors live here, both built with `thiserror`:
//!
//! - [`StorageError`] is what adapters report. The facade never inspects it
//!   beyond wrapping it.
//! - [`Error`] is the public taxonomy of [`Filesystem`](crate::Filesystem)
//!   operations. Precondition failures are detected locally, every adapter
//!   failure arrives as [`Error::StorageFailure`], and a missing optional
//!   capability is a separate logic error.

use thiserror::Error;

/// The main error type returned by [`Filesystem`](crate::Filesystem) operations
#[derive(Error, Debug)]
pub enum Error {
    /// An operation that requires the key to exist found nothing there
    #[error("The file \"{key}\" was not found")]
    FileNotFound {
        /// Key that was looked up
        key: String,
    },

    /// A non-overwriting write found the key already present
    #[error("The file \"{key}\" already exists")]
    FileAlreadyExists {
        /// Key the write targeted
        key: String,
    },

    /// A rename target is already occupied
    #[error("The file \"{key}\" was not supposed to exist")]
    UnexpectedFile {
        /// Occupied rename target
        key: String,
    },

    /// The adapter failed while the facade was delegating to it
    #[error(transparent)]
    StorageFailure(#[from] StorageFailure),

    /// The adapter does not implement a capability the caller asked for.
    ///
    /// This is a configuration error, not a storage condition.
    #[error("Adapter \"{adapter}\" cannot provide {capability}")]
    UnsupportedCapability {
        /// Name reported by the adapter
        adapter: String,
        /// Capability that was requested
        capability: &'static str,
    },
}

impl Error {
    pub(crate) fn file_not_found(key: &str) -> Self {
        Error::FileNotFound {
            key: key.to_string(),
        }
    }

    pub(crate) fn file_already_exists(key: &str) -> Self {
        Error::FileAlreadyExists {
            key: key.to_string(),
        }
    }

    pub(crate) fn unexpected_file(key: &str) -> Self {
        Error::UnexpectedFile {
            key: key.to_string(),
        }
    }

    /// Whether this error wraps an adapter failure
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Error::StorageFailure(_))
    }

    /// Whether this error signals a caller/adapter mismatch rather than a
    /// storage condition
    pub fn is_logic_error(&self) -> bool {
        matches!(self, Error::UnsupportedCapability { .. })
    }

    /// The key a precondition failure refers to
    pub fn key(&self) -> Option<&str> {
        match self {
            Error::FileNotFound { key }
            | Error::FileAlreadyExists { key }
            | Error::UnexpectedFile { key } => Some(key),
            _ => None,
        }
    }
}

/// An adapter failure captured together with the operation that triggered it
#[derive(Error, Debug)]
#[error("An unexpected error happened during {operation} with arguments {context:?}")]
pub struct StorageFailure {
    operation: &'static str,
    context: Vec<String>,
    #[source]
    source: StorageError,
}

impl StorageFailure {
    /// Wrap an adapter error raised while running `operation` with `context`
    pub fn unexpected_failure(
        operation: &'static str,
        context: &[&str],
        source: StorageError,
    ) -> Self {
        Self {
            operation,
            context: context.iter().map(|arg| arg.to_string()).collect(),
            source,
        }
    }

    /// Name of the adapter operation that failed
    pub fn operation(&self) -> &str {
        self.operation
    }

    /// Arguments the operation was called with
    pub fn context(&self) -> &[String] {
        &self.context
    }

    /// The adapter's original error
    pub fn cause(&self) -> &StorageError {
        &self.source
    }

    /// Unwrap into the adapter's original error
    pub fn into_cause(self) -> StorageError {
        self.source
    }
}

/// Errors reported by storage adapters
#[derive(Error, Debug)]
pub enum StorageError {
    /// Storage operation failed
    #[error("Storage operation failed: {operation}: {reason}")]
    OperationFailed {
        /// Backend operation that failed
        operation: String,
        /// Backend explanation
        reason: String,
    },

    /// Resource not found in the backend
    #[error("Resource not found: {resource}")]
    ResourceNotFound {
        /// Backend resource that is missing
        resource: String,
    },

    /// Permission denied
    #[error("Permission denied: {resource}")]
    PermissionDenied {
        /// Backend resource access was refused for
        resource: String,
    },

    /// Storage quota exceeded
    #[error("Storage quota exceeded")]
    QuotaExceeded,

    /// Connection error
    #[error("Connection error: {reason}")]
    ConnectionError {
        /// What went wrong with the connection
        reason: String,
    },

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other backend-specific failure
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Convenience type alias for facade Results
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience type alias for adapter Results
pub type StorageResult<T> = std::result::Result<T, StorageError>;
