//! File classification using glob patterns
//!
//! Category patterns are matched against base names, user exclude patterns
//! against the full path.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

use super::{DiscoveryError, Result};
use crate::Category;

/// Pattern matcher using GlobSet for efficient matching
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    /// Compiled glob set for matching
    globset: GlobSet,
    /// Patterns as given, for reporting
    patterns: Vec<String>,
}

impl PatternMatcher {
    /// Create a new pattern matcher from glob patterns
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| DiscoveryError::InvalidPattern(format!("{pattern}: {e}")))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| DiscoveryError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            globset,
            patterns: patterns.to_vec(),
        })
    }

    /// Check if a path matches any of the patterns
    pub fn matches(&self, path: &Path) -> bool {
        self.globset.is_match(path)
    }

    /// Patterns as given
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Assigns discovered paths to a category, honoring exclude patterns
#[derive(Debug)]
pub struct CategoryFilter {
    /// One matcher per category, in reporting order
    categories: Vec<(Category, PatternMatcher)>,
    /// Exclude patterns matcher (overrides category matches)
    exclude_matcher: Option<PatternMatcher>,
}

impl CategoryFilter {
    /// Create a filter for all categories with optional exclude patterns
    pub fn new(exclude_patterns: &[String]) -> Result<Self> {
        let categories = Category::ALL
            .into_iter()
            .map(|category| Ok((category, PatternMatcher::new(&[category.pattern()])?)))
            .collect::<Result<Vec<_>>>()?;

        let exclude_matcher = if !exclude_patterns.is_empty() {
            Some(PatternMatcher::new(exclude_patterns)?)
        } else {
            None
        };

        Ok(Self {
            categories,
            exclude_matcher,
        })
    }

    /// Determine the category of a path
    ///
    /// Rules:
    /// 1. If the full path matches an exclude pattern -> None
    /// 2. If the base name matches a category pattern -> that category
    /// 3. Otherwise -> None
    pub fn classify(&self, path: &Path) -> Option<Category> {
        if let Some(ref exclude) = self.exclude_matcher
            && exclude.matches(path)
        {
            log::debug!("Excluded by pattern: {}", path.display());
            return None;
        }

        let file_name = Path::new(path.file_name()?);
        self.categories
            .iter()
            .find(|(_, matcher)| matcher.matches(file_name))
            .map(|(category, _)| *category)
    }

    /// Exclude patterns in effect
    pub fn exclude_patterns(&self) -> &[String] {
        self.exclude_matcher
            .as_ref()
            .map(PatternMatcher::patterns)
            .unwrap_or_default()
    }
}
