//! Per-category collection of discovered tables

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{DiscoveryError, DiscoveryOptions, FileDiscovery, Result};
use crate::Category;

/// Discovered table paths grouped by category
///
/// Every category is present, possibly with an empty list. Paths within a
/// category are sorted by their byte representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedFiles {
    root: PathBuf,
    root_exists: bool,
    files: BTreeMap<Category, Vec<PathBuf>>,
}

impl LocatedFiles {
    /// Build from an unordered set of classified paths
    pub fn from_files<I>(root: &Path, root_exists: bool, files: I) -> Self
    where
        I: IntoIterator<Item = (Category, PathBuf)>,
    {
        let mut grouped: BTreeMap<Category, Vec<PathBuf>> =
            Category::ALL.into_iter().map(|c| (c, Vec::new())).collect();

        for (category, path) in files {
            grouped.entry(category).or_default().push(path);
        }
        for paths in grouped.values_mut() {
            paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        }

        Self {
            root: root.to_path_buf(),
            root_exists,
            files: grouped,
        }
    }

    /// Search root the files were located under
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the search root existed when located
    pub fn root_exists(&self) -> bool {
        self.root_exists
    }

    /// Sorted paths for one category
    pub fn get(&self, category: Category) -> &[PathBuf] {
        self.files.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    /// Categories with their paths, in reporting order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[PathBuf])> {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Total number of located files
    pub fn total(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    /// Whether nothing was found
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Locate all contamination tables under `root`
///
/// A missing root is not an error; it produces empty lists.
pub fn locate(root: &Path, options: &DiscoveryOptions) -> Result<LocatedFiles> {
    log::debug!("Locating contamination tables under {}", root.display());

    let discovery = match FileDiscovery::new(root, options) {
        Ok(discovery) => discovery,
        Err(DiscoveryError::PathNotFound(path)) => {
            log::warn!("Search directory does not exist: {}", path.display());
            return Ok(LocatedFiles::from_files(root, false, std::iter::empty()));
        }
        Err(e) => return Err(e),
    };

    let located = LocatedFiles::from_files(
        root,
        true,
        discovery.map(|file| {
            log::debug!("Found {} table: {}", file.category, file.path.display());
            (file.category, file.path)
        }),
    );

    for (category, paths) in located.iter() {
        log::debug!("{category}: {} files", paths.len());
    }

    Ok(located)
}
