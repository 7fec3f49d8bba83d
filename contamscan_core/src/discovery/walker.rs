//! Directory walker module for file discovery
//!
//! Provides streaming file discovery using walkdir with category
//! classification. Hidden entries are pruned the way a shell glob would.

use serde::{Deserialize, Serialize};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use super::{CategoryFilter, DiscoveredFile, DiscoveryError, Result};

/// Options for file discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryOptions {
    /// Follow symbolic links to files and directories
    pub follow_links: bool,
    /// Descend into and report entries whose name starts with `.`
    pub include_hidden: bool,
    /// Maximum depth below the root (None = unlimited, 1 = root's own files)
    pub max_depth: Option<usize>,
    /// Patterns to exclude (glob patterns, matched against the full path)
    pub exclude_patterns: Vec<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            follow_links: true,
            include_hidden: false,
            max_depth: None,
            exclude_patterns: Vec::new(),
        }
    }
}

impl DiscoveryOptions {
    /// Create new options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to follow symbolic links
    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set whether hidden entries are searched
    pub fn with_include_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    /// Set maximum depth for recursive search
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Add exclude patterns
    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }
}

/// File discovery iterator for streaming file enumeration
pub struct FileDiscovery {
    /// Walker for directory traversal
    walker: Box<dyn Iterator<Item = walkdir::Result<DirEntry>>>,
    /// Category classification
    filter: CategoryFilter,
}

impl FileDiscovery {
    /// Create a new file discovery iterator
    pub fn new(root: &Path, options: &DiscoveryOptions) -> Result<Self> {
        if !root.exists() {
            return Err(DiscoveryError::PathNotFound(root.to_path_buf()));
        }

        let filter = CategoryFilter::new(&options.exclude_patterns)?;
        if !filter.exclude_patterns().is_empty() {
            log::debug!("Exclude patterns: {:?}", filter.exclude_patterns());
        }

        let mut walker = WalkDir::new(root).follow_links(options.follow_links);
        if let Some(depth) = options.max_depth {
            walker = walker.max_depth(depth);
        }

        let include_hidden = options.include_hidden;
        let walker = walker
            .into_iter()
            .filter_entry(move |entry| include_hidden || entry.depth() == 0 || !is_hidden(entry));

        Ok(Self {
            walker: Box::new(walker),
            filter,
        })
    }

    /// Classify an entry, skipping directories and the root itself
    fn discover_entry(&self, entry: &DirEntry) -> Option<DiscoveredFile> {
        if entry.depth() == 0 || entry.file_type().is_dir() {
            return None;
        }

        let category = self.filter.classify(entry.path())?;
        Some(DiscoveredFile {
            path: entry.path().to_path_buf(),
            category,
        })
    }
}

impl Iterator for FileDiscovery {
    type Item = DiscoveredFile;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walker.next()? {
                Ok(entry) => {
                    if let Some(file) = self.discover_entry(&entry) {
                        return Some(file);
                    }
                }
                Err(e) => {
                    // Unreadable directories and link loops are skipped
                    log::warn!("Walk error: {e}");
                    continue;
                }
            }
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
