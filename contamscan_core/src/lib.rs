//! contamscan core library
//!
//! Locates GATK contamination tables (`*_getpileupsummaries.table`,
//! `*_calculatecontamination.table`, `*_segments.table`) under a directory
//! tree, checks that every sample has all three, writes path lists and
//! optionally mirrors the tables into a directory of symlinks.
//!
//! # Modules
//!
//! - [`category`] - The three table categories and sample-name derivation.
//! - [`discovery`] - Recursive walking and per-category collection.
//! - [`completeness`] - Per-sample completeness checking.
//! - [`writer`] - Path-list output files.
//! - [`mirror`] - Symlink mirroring.

pub mod category;
pub mod completeness;
pub mod discovery;
pub mod error;
pub mod mirror;
pub mod writer;

pub use category::Category;
pub use completeness::{AmbiguousMatch, CompletenessReport, MatchMode, check_completeness};
pub use discovery::{DiscoveryOptions, LocatedFiles, locate};
pub use error::{Error, Result};
pub use mirror::{MirrorReport, mirror_symlinks};
pub use writer::{WrittenList, write_path_lists};
