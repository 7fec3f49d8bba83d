//! File discovery module for finding contamination tables
//!
//! This module walks a directory tree, classifies file names by their
//! category suffix and collects the matches into sorted per-category lists.

mod filter;
mod locator;
mod walker;

pub use filter::{CategoryFilter, PatternMatcher};
pub use locator::{LocatedFiles, locate};
pub use walker::{DiscoveryOptions, FileDiscovery};

use crate::Category;
use std::path::PathBuf;

/// A file matched by one of the category patterns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Path to the discovered file, prefixed with the search root as given
    pub path: PathBuf,
    /// Category the file name matched
    pub category: Category,
}

/// Error type for file discovery operations
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Invalid glob pattern: {0}")]
    InvalidPattern(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Result type for file discovery operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;
