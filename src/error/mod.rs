//! Error types for append operations.
//!
//! This module provides:
//! - `Stage`: Indicates where an I/O failure occurred in the append sequence
//! - `ErrorClass`: Usage, resource or I/O classification of an error
//! - `IoFailure`: A single I/O failure with context
//! - `AppendError`: The error returned by every append entry point

use std::fmt;
use std::io;

use thiserror::Error;

use crate::config::Encoding;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Error while opening the target file
    Open,
    Write,
    /// Error while releasing a file the writer opened itself
    Close,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Open => write!(f, "Open"),
            Stage::Write => write!(f, "Write"),
            Stage::Close => write!(f, "Close"),
        }
    }
}

/// Broad classification of an [`AppendError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Caller-fixable misuse, detected before any I/O.
    Usage,
    /// The target could not be opened (missing, forbidden, a directory...).
    Resource,
    /// Writing to or closing an open file failed.
    Io,
}

#[derive(Debug)]
pub struct IoFailure {
    /// Stage where the error occurred
    pub stage: Stage,
    /// Identifier of the target (file path or handle id)
    pub target: String,
    /// The underlying error
    pub error: io::Error,
    /// Close error that happened while cleaning up after a failed write
    pub close_error: Option<io::Error>,
}

impl IoFailure {
    pub(crate) fn new(stage: Stage, target: impl Into<String>, error: io::Error) -> Self {
        Self {
            stage,
            target: target.into(),
            error,
            close_error: None,
        }
    }

    pub(crate) fn with_close_error(mut self, close_error: io::Error) -> Self {
        self.close_error = Some(close_error);
        self
    }

    /// POSIX-style error code of the underlying error, e.g. `ENOENT`.
    pub fn code(&self) -> &'static str {
        errno_name(&self.error)
    }
}

impl fmt::Display for IoFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.target, self.error)?;
        if let Some(close_error) = &self.close_error {
            write!(f, " (close also failed: {close_error})")?;
        }
        Ok(())
    }
}

impl std::error::Error for IoFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Error returned by the append entry points.
#[derive(Debug, Error)]
pub enum AppendError {
    #[error("callback must be a function, received {received}")]
    InvalidCallback { received: String },

    #[error("data must be a string, a byte buffer or a number, received {received}")]
    InvalidPayload { received: String },

    #[error("text is not valid {encoding}: {reason}")]
    InvalidEncodedText { encoding: Encoding, reason: String },

    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    #[error("invalid open flag: {0:?}")]
    InvalidFlag(String),

    #[error("invalid write options: {0}")]
    InvalidOptions(String),

    #[error("no tokio runtime is running to complete the append")]
    NoRuntime,

    #[error("blocking append called from within a tokio runtime")]
    BlockingInRuntime,

    #[error(transparent)]
    Io(#[from] IoFailure),
}

impl AppendError {
    pub fn class(&self) -> ErrorClass {
        match self {
            AppendError::Io(failure) if failure.stage == Stage::Open => ErrorClass::Resource,
            AppendError::Io(_) => ErrorClass::Io,
            _ => ErrorClass::Usage,
        }
    }

    /// Stable error code, in the style of Node's `err.code`.
    pub fn code(&self) -> &'static str {
        match self {
            AppendError::InvalidCallback { .. } => "ERR_INVALID_CALLBACK",
            AppendError::InvalidPayload { .. } | AppendError::InvalidOptions(_) => {
                "ERR_INVALID_ARG_TYPE"
            }
            AppendError::InvalidEncodedText { .. } | AppendError::InvalidFlag(_) => {
                "ERR_INVALID_ARG_VALUE"
            }
            AppendError::UnknownEncoding(_) => "ERR_UNKNOWN_ENCODING",
            AppendError::NoRuntime | AppendError::BlockingInRuntime => "ERR_NO_RUNTIME",
            AppendError::Io(failure) => failure.code(),
        }
    }

    /// The stage of an I/O failure, `None` for usage errors.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            AppendError::Io(failure) => Some(failure.stage),
            _ => None,
        }
    }

    pub(crate) fn io(stage: Stage, target: impl Into<String>, error: io::Error) -> Self {
        AppendError::Io(IoFailure::new(stage, target, error))
    }
}

/// Error used for operations on a handle that was already closed.
pub(crate) fn bad_descriptor() -> io::Error {
    #[cfg(unix)]
    {
        io::Error::from_raw_os_error(libc::EBADF)
    }
    #[cfg(not(unix))]
    {
        io::Error::new(io::ErrorKind::Other, "bad file descriptor")
    }
}

fn errno_name(error: &io::Error) -> &'static str {
    #[cfg(unix)]
    if let Some(name) = error.raw_os_error().and_then(unix_errno_name) {
        return name;
    }

    match error.kind() {
        io::ErrorKind::NotFound => "ENOENT",
        io::ErrorKind::PermissionDenied => "EACCES",
        io::ErrorKind::IsADirectory => "EISDIR",
        io::ErrorKind::NotADirectory => "ENOTDIR",
        io::ErrorKind::AlreadyExists => "EEXIST",
        io::ErrorKind::StorageFull => "ENOSPC",
        io::ErrorKind::ReadOnlyFilesystem => "EROFS",
        _ => "EIO",
    }
}

#[cfg(unix)]
fn unix_errno_name(raw: i32) -> Option<&'static str> {
    let name = match raw {
        libc::ENOENT => "ENOENT",
        libc::EACCES => "EACCES",
        libc::EPERM => "EPERM",
        libc::EISDIR => "EISDIR",
        libc::ENOTDIR => "ENOTDIR",
        libc::EEXIST => "EEXIST",
        libc::EBADF => "EBADF",
        libc::ENOSPC => "ENOSPC",
        libc::EROFS => "EROFS",
        libc::EMFILE => "EMFILE",
        libc::EIO => "EIO",
        _ => return None,
    };
    Some(name)
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
