//! Contamination table categories
//!
//! GATK's contamination workflow leaves three tables per sample behind. Each
//! category is identified purely by its file name suffix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// One of the three contamination table types
///
/// The declaration order is the reporting order everywhere in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// `GetPileupSummaries` output
    GetPileupSummaries,
    /// `CalculateContamination` output
    CalculateContamination,
    /// Tumor segmentation written by `CalculateContamination`
    Segments,
}

impl Category {
    /// All categories in reporting order
    pub const ALL: [Category; 3] = [
        Category::GetPileupSummaries,
        Category::CalculateContamination,
        Category::Segments,
    ];

    /// Short tag used in output file names and reports
    pub fn tag(self) -> &'static str {
        match self {
            Category::GetPileupSummaries => "getpileupsummaries",
            Category::CalculateContamination => "calculatecontamination",
            Category::Segments => "segments",
        }
    }

    /// File name suffix shared by every table of this category
    pub fn suffix(self) -> &'static str {
        match self {
            Category::GetPileupSummaries => "_getpileupsummaries.table",
            Category::CalculateContamination => "_calculatecontamination.table",
            Category::Segments => "_segments.table",
        }
    }

    /// Glob pattern matched against file base names
    pub fn pattern(self) -> String {
        format!("*{}", self.suffix())
    }

    /// Derive the sample name from a base name.
    ///
    /// Returns `None` when the name does not carry this category's suffix.
    pub fn sample_name(self, file_name: &str) -> Option<&str> {
        file_name.strip_suffix(self.suffix())
    }

    /// Derive the sample name from a path's base name
    pub fn sample_name_of(self, path: &Path) -> Option<String> {
        let file_name = path.file_name()?.to_string_lossy();
        self.sample_name(&file_name).map(str::to_string)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
