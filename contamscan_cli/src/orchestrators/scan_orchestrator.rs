//! Scan command orchestrator
//!
//! Runs the stages of a scan in order: locate the tables, check sample
//! completeness, write path lists and mirror the tables as symlinks. Each
//! stage's report is written as soon as the stage finishes.

use crate::output::{OutputFormat, ReportFormatter, ScanReport, create_formatter};
use anyhow::{Context, Result};
use contamscan_core::{DiscoveryOptions, MatchMode, check_completeness, locate};
use log::{debug, info};
use std::io::Write;
use std::path::PathBuf;

/// Options for a single scan
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Directory searched recursively
    pub directory: PathBuf,
    /// Where path lists are written, if anywhere
    pub output: Option<PathBuf>,
    /// Directory receiving symlinks to every located file
    pub symlink_dir: Option<PathBuf>,
    pub discovery: DiscoveryOptions,
    pub match_mode: MatchMode,
    pub format: OutputFormat,
    pub use_color: bool,
}

impl ScanOptions {
    /// Options for scanning a directory with defaults for everything else
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            output: None,
            symlink_dir: None,
            discovery: DiscoveryOptions::default(),
            match_mode: MatchMode::default(),
            format: OutputFormat::Text,
            use_color: false,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_symlink_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.symlink_dir = Some(dir.into());
        self
    }

    pub fn with_discovery(mut self, discovery: DiscoveryOptions) -> Self {
        self.discovery = discovery;
        self
    }

    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Orchestrator for the scan command
pub struct ScanOrchestrator {
    options: ScanOptions,
    formatter: Box<dyn ReportFormatter>,
}

impl ScanOrchestrator {
    /// Create a new scan orchestrator
    pub fn new(options: ScanOptions) -> Self {
        let formatter = create_formatter(options.format, options.use_color);
        Self { options, formatter }
    }

    /// Run every stage, writing the report to `out`
    pub fn run(&self, out: &mut dyn Write) -> Result<ScanReport> {
        let options = &self.options;
        debug!(
            "Scanning {} (match mode {:?})",
            options.directory.display(),
            options.match_mode
        );

        let located = locate(&options.directory, &options.discovery)
            .map_err(contamscan_core::Error::from)
            .with_context(|| format!("Failed to search {}", options.directory.display()))?;
        info!("Located {} table(s)", located.total());

        let completeness = check_completeness(&located, options.match_mode);
        emit(out, self.formatter.format_discovery(&located, &completeness))?;

        let mut report = ScanReport {
            located,
            completeness,
            written: None,
            mirror: None,
        };

        if let Some(output) = &options.output {
            let written = contamscan_core::write_path_lists(&report.located, output)
                .context("Failed to write path lists")?;
            debug!("Wrote {} path list(s)", written.len());
            emit(out, self.formatter.format_written(&written))?;
            report.written = Some(written);
        }

        if let Some(symlink_dir) = &options.symlink_dir {
            let mirror = contamscan_core::mirror_symlinks(&report.located, symlink_dir)
                .context("Failed to create symlinks")?;
            info!("Created {} symlink(s)", mirror.links.len());
            emit(out, self.formatter.format_mirror(&mirror))?;
            report.mirror = Some(mirror);
        }

        emit(out, self.formatter.finalize(&report)?)?;
        out.flush().context("Failed to flush report")?;

        Ok(report)
    }
}

fn emit(out: &mut dyn Write, chunk: Option<String>) -> Result<()> {
    if let Some(chunk) = chunk {
        out.write_all(chunk.as_bytes())
            .context("Failed to write report")?;
    }
    Ok(())
}
