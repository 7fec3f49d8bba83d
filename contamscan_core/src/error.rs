//! Error types for the contamscan core library
//!
//! Discovery problems and filesystem failures during output are kept apart so
//! callers can map them to different exit codes.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use crate::discovery::DiscoveryError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the contamscan core library
#[derive(Error, Debug)]
pub enum Error {
    /// File discovery failed
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Writing path lists or symlinks failed
    #[error(transparent)]
    Io(#[from] IoError),
}

impl Error {
    /// Path associated with the error, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Io(e) => Some(&e.path),
            Self::Discovery(DiscoveryError::PathNotFound(path)) => Some(path),
            Self::Discovery(DiscoveryError::InvalidPattern(_)) => None,
        }
    }

    /// Whether the failure came from the filesystem
    pub fn is_filesystem(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Discovery(DiscoveryError::PathNotFound(_))
        )
    }
}

/// Filesystem operation that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    /// Creating or writing an output file
    Write,
    /// Creating a directory
    CreateDir,
    /// Removing an existing entry before relinking
    Remove,
    /// Creating a symbolic link
    Symlink,
    /// Resolving a path to its absolute form
    Resolve,
}

impl IoOperation {
    fn describe(self) -> &'static str {
        match self {
            IoOperation::Write => "write",
            IoOperation::CreateDir => "create directory",
            IoOperation::Remove => "remove",
            IoOperation::Symlink => "create symlink",
            IoOperation::Resolve => "resolve",
        }
    }
}

/// I/O error with the path and operation it relates to
#[derive(Error, Debug)]
#[error("failed to {} '{}': {source}", operation.describe(), path.display())]
pub struct IoError {
    /// What was being done
    pub operation: IoOperation,
    /// Path the operation was applied to
    pub path: PathBuf,
    /// Underlying I/O error
    #[source]
    pub source: std::io::Error,
}

impl IoError {
    /// Create an I/O error for an operation on a path
    pub fn new(operation: IoOperation, path: &Path, source: std::io::Error) -> Self {
        Self {
            operation,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Kind of the underlying I/O error
    pub fn kind(&self) -> std::io::ErrorKind {
        self.source.kind()
    }
}

/// Build a `map_err` closure attaching an operation and path to an I/O error
pub(crate) fn io_err(
    operation: IoOperation,
    path: &Path,
) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Io(IoError::new(operation, path, source))
}
