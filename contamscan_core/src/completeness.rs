//! Per-sample completeness checking
//!
//! Sample names are derived per category by stripping the category suffix,
//! then every sample is looked up in every category. In substring mode a
//! sample counts as present when its name occurs anywhere in a file's base
//! name, which over-matches when one sample name contains another (`S1` is
//! "found" in `S10_segments.table`). Such matches are reported as
//! [`AmbiguousMatch`]es.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::Category;
use crate::discovery::LocatedFiles;

/// How a sample is looked up in a category's files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Sample name contained anywhere in the base name
    #[default]
    Substring,
    /// Derived sample name equal to the sample
    Exact,
}

/// A sample covered in a category only by another sample's file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguousMatch {
    pub sample: String,
    pub category: Category,
    /// File whose base name contains the sample name
    pub matched_file: PathBuf,
}

/// Result of the completeness check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletenessReport {
    pub mode: MatchMode,
    /// Files located per category
    pub files_per_category: BTreeMap<Category, usize>,
    /// Distinct sample names derived per category
    pub samples_per_category: BTreeMap<Category, BTreeSet<String>>,
    /// Every sample mapped to the categories it is missing
    pub missing: BTreeMap<String, Vec<Category>>,
    /// Substring-only coverages, empty in exact mode
    pub ambiguous: Vec<AmbiguousMatch>,
}

impl CompletenessReport {
    /// All samples seen in any category
    pub fn samples(&self) -> impl Iterator<Item = &str> {
        self.missing.keys().map(String::as_str)
    }

    /// Number of unique samples across categories
    pub fn total_samples(&self) -> usize {
        self.missing.len()
    }

    /// Samples missing at least one category
    pub fn incomplete(&self) -> impl Iterator<Item = (&str, &[Category])> {
        self.missing
            .iter()
            .filter(|(_, categories)| !categories.is_empty())
            .map(|(sample, categories)| (sample.as_str(), categories.as_slice()))
    }

    /// Number of incomplete samples
    pub fn incomplete_count(&self) -> usize {
        self.incomplete().count()
    }

    /// Whether every sample has a file in every category
    pub fn is_complete(&self) -> bool {
        self.incomplete_count() == 0
    }

    /// Categories a sample is missing, `None` for unknown samples
    pub fn missing_for(&self, sample: &str) -> Option<&[Category]> {
        self.missing.get(sample).map(Vec::as_slice)
    }
}

/// Check every sample against every category
pub fn check_completeness(located: &LocatedFiles, mode: MatchMode) -> CompletenessReport {
    let mut files_per_category = BTreeMap::new();
    let mut samples_per_category = BTreeMap::new();

    for (category, paths) in located.iter() {
        files_per_category.insert(category, paths.len());
        let samples: BTreeSet<String> = paths
            .iter()
            .filter_map(|path| category.sample_name_of(path))
            .collect();
        samples_per_category.insert(category, samples);
    }

    let all_samples: BTreeSet<&String> = samples_per_category.values().flatten().collect();

    let mut missing = BTreeMap::new();
    let mut ambiguous = Vec::new();

    for sample in all_samples {
        let mut absent = Vec::new();
        for (category, paths) in located.iter() {
            match find_match(sample, category, paths, mode) {
                Some(path) => {
                    if !samples_per_category[&category].contains(sample) {
                        log::warn!(
                            "Sample '{sample}' matched {category} only via {}",
                            path.display()
                        );
                        ambiguous.push(AmbiguousMatch {
                            sample: sample.clone(),
                            category,
                            matched_file: path.to_path_buf(),
                        });
                    }
                }
                None => absent.push(category),
            }
        }
        missing.insert(sample.clone(), absent);
    }

    CompletenessReport {
        mode,
        files_per_category,
        samples_per_category,
        missing,
        ambiguous,
    }
}

fn find_match<'a>(
    sample: &str,
    category: Category,
    paths: &'a [PathBuf],
    mode: MatchMode,
) -> Option<&'a Path> {
    paths
        .iter()
        .find(|path| match mode {
            MatchMode::Substring => path
                .file_name()
                .is_some_and(|name| name.to_string_lossy().contains(sample)),
            MatchMode::Exact => category.sample_name_of(path).as_deref() == Some(sample),
        })
        .map(PathBuf::as_path)
}
