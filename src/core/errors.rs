/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::signals::types::SignalOperation;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use thiserror::Error;

/// Signal operation result
pub type SignalResult<T> = Result<T, SignalError>;

/// Directory operation result
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Caller-visible signal failures
///
/// A failed operation leaves the prior disposition of the signal unchanged.
/// Platform-absent identities are not errors; the resolver reports them as
/// `None`.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SignalError {
    #[error("Invalid signal: {0}")]
    #[diagnostic(
        code(signals::invalid_signal),
        help("Resolve a SignalIdentity first; only resolved numbers below the record width can be collected.")
    )]
    InvalidSignal(i32),

    #[error("{operation} rejected for signal {signum}: {reason}")]
    #[diagnostic(
        code(signals::rejected),
        help("The OS refused the request. Reserved signals such as SIGKILL and SIGSTOP cannot be overridden.")
    )]
    Rejected {
        operation: SignalOperation,
        signum: i32,
        reason: String,
    },

    #[error("{operation} is not supported: {reason}")]
    #[diagnostic(
        code(signals::unsupported),
        help("This operation is not available on the current platform.")
    )]
    Unsupported {
        operation: SignalOperation,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(signals::configuration_error),
        help("Check the RUNTIME_SIGNALS_POLICY value. Expected a JSON object of identity -> disposition.")
    )]
    Config(String),
}

impl SignalError {
    pub(crate) fn rejected(
        operation: SignalOperation,
        signum: i32,
        reason: impl ToString,
    ) -> Self {
        SignalError::Rejected {
            operation,
            signum,
            reason: reason.to_string(),
        }
    }

    #[cfg_attr(unix, allow(dead_code))]
    pub(crate) fn unsupported(operation: SignalOperation, reason: impl Into<String>) -> Self {
        SignalError::Unsupported {
            operation,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for SignalError {
    fn from(err: serde_json::Error) -> Self {
        SignalError::Config(err.to_string())
    }
}

/// Directory layer errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum DirectoryError {
    #[error("Directory not found: {0}")]
    #[diagnostic(code(directory::not_found), help("Check that the path exists."))]
    NotFound(String),

    #[error("Directory already exists: {0}")]
    #[diagnostic(code(directory::already_exists))]
    AlreadyExists(String),

    #[error("Invalid path: {0}")]
    #[diagnostic(
        code(directory::invalid_path),
        help("The path must be non-empty.")
    )]
    InvalidPath(String),

    #[error("I/O error on {path}: {message}")]
    #[diagnostic(
        code(directory::io_error),
        help("Filesystem operation failed. Check permissions and that the directory is empty when removing.")
    )]
    Io { path: String, message: String },
}

impl DirectoryError {
    /// Classify an io::Error raised while operating on `path`
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
        let display = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => DirectoryError::NotFound(display),
            io::ErrorKind::AlreadyExists => DirectoryError::AlreadyExists(display),
            _ => DirectoryError::Io {
                path: display,
                message: err.to_string(),
            },
        }
    }
}
