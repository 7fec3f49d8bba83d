//! Fixture builders for creating test directory trees

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Table suffixes in reporting order
pub const SAMPLE_TABLE_SUFFIXES: [&str; 3] = [
    "_getpileupsummaries.table",
    "_calculatecontamination.table",
    "_segments.table",
];

/// Builder for a temporary directory holding contamination tables
#[derive(Debug, Default)]
pub struct TestTreeBuilder {
    files: Vec<(PathBuf, Vec<u8>)>,
    dirs: Vec<PathBuf>,
}

impl TestTreeBuilder {
    /// Create a new empty tree builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file at a path relative to the root
    pub fn with_file(mut self, relative: impl AsRef<Path>, content: &[u8]) -> Self {
        self.files
            .push((relative.as_ref().to_path_buf(), content.to_vec()));
        self
    }

    /// Add one table for a sample, e.g. `("run1", "A", "_segments.table")`
    pub fn with_table(self, dir: impl AsRef<Path>, sample: &str, suffix: &str) -> Self {
        let path = dir.as_ref().join(format!("{sample}{suffix}"));
        let content = format!("# {sample}\n");
        self.with_file(path, content.as_bytes())
    }

    /// Add all three tables for a sample under `dir`
    pub fn with_complete_sample(self, dir: impl AsRef<Path>, sample: &str) -> Self {
        let dir = dir.as_ref().to_path_buf();
        SAMPLE_TABLE_SUFFIXES
            .iter()
            .fold(self, |builder, suffix| builder.with_table(&dir, sample, suffix))
    }

    /// Add an empty directory
    pub fn with_dir(mut self, relative: impl AsRef<Path>) -> Self {
        self.dirs.push(relative.as_ref().to_path_buf());
        self
    }

    /// Materialize the tree under a fresh temporary directory
    pub fn build(self) -> TestTree {
        let temp = TempDir::new().expect("failed to create temp dir");
        let root = temp.path().join("results");
        fs::create_dir_all(&root).expect("failed to create root");

        for dir in &self.dirs {
            fs::create_dir_all(root.join(dir)).expect("failed to create dir");
        }
        for (relative, content) in &self.files {
            let path = root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("failed to create parent dir");
            }
            fs::write(&path, content).expect("failed to write fixture file");
        }

        TestTree { temp, root }
    }
}

/// A materialized fixture tree; removed on drop
#[derive(Debug)]
pub struct TestTree {
    temp: TempDir,
    root: PathBuf,
}

impl TestTree {
    /// Search root containing the fixture files
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scratch directory outside the search root, for outputs and links
    pub fn scratch(&self) -> PathBuf {
        let scratch = self.temp.path().join("scratch");
        fs::create_dir_all(&scratch).expect("failed to create scratch dir");
        scratch
    }

    /// Absolute path of a fixture file
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }
}
