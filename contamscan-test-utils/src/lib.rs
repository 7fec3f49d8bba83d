//! Test utilities for contamscan
//!
//! This crate provides a builder for fixture directory trees filled with
//! contamination tables.

pub mod builders;

// Re-export commonly used types
pub use builders::{SAMPLE_TABLE_SUFFIXES, TestTree, TestTreeBuilder};
