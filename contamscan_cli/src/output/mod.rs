mod formatters;

pub use formatters::{JsonFormatter, TextFormatter};

use anyhow::Result;
use contamscan_core::{CompletenessReport, LocatedFiles, MirrorReport, WrittenList};
use serde::{Deserialize, Serialize};

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// One JSON document with the whole report
    Json,
}

/// Everything a scan produced, in processing order
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub located: LocatedFiles,
    pub completeness: CompletenessReport,
    pub written: Option<Vec<WrittenList>>,
    pub mirror: Option<MirrorReport>,
}

/// Trait for report formatters
///
/// Stage methods are called as soon as a stage finishes so text output
/// appears progressively; `finalize` is called once with the full report.
pub trait ReportFormatter {
    /// Format the located files and completeness summary
    fn format_discovery(
        &self,
        located: &LocatedFiles,
        completeness: &CompletenessReport,
    ) -> Option<String>;

    /// Format the list of written path files
    fn format_written(&self, written: &[WrittenList]) -> Option<String> {
        let _ = written;
        None
    }

    /// Format the symlink mirror outcome
    fn format_mirror(&self, mirror: &MirrorReport) -> Option<String> {
        let _ = mirror;
        None
    }

    /// Finalize output once every stage has run
    fn finalize(&self, report: &ScanReport) -> Result<Option<String>> {
        let _ = report;
        Ok(None)
    }
}

/// Create a formatter based on output format
pub fn create_formatter(format: OutputFormat, use_color: bool) -> Box<dyn ReportFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
    }
}
