use super::{ReportFormatter, ScanReport};
use anyhow::Result;
use colored::*;
use contamscan_core::writer::ListKind;
use contamscan_core::{Category, CompletenessReport, LocatedFiles, MirrorReport, WrittenList};

const RULE_WIDTH: usize = 60;

/// Text formatter for human-readable output
pub struct TextFormatter {
    use_color: bool,
}

impl TextFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn rule(&self) -> String {
        "=".repeat(RULE_WIDTH)
    }

    fn format_located(&self, out: &mut String, located: &LocatedFiles) {
        let root = located.root().display().to_string();
        out.push_str(&format!(
            "Searching in directory: {}\n",
            self.colorize(&root, |s| s.cyan())
        ));
        let exists = located.root_exists().to_string();
        let exists = if located.root_exists() {
            self.colorize(&exists, |s| s.green())
        } else {
            self.colorize(&exists, |s| s.yellow())
        };
        out.push_str(&format!("Directory exists: {exists}\n"));
        out.push_str(&format!("{}\n", self.rule()));

        for (category, paths) in located.iter() {
            out.push_str(&format!(
                "\nSearching for {} files...\n",
                self.colorize(category.tag(), |s| s.bold())
            ));
            out.push_str(&format!("Pattern: {}\n", category.pattern()));
            out.push_str(&format!("Found {} files:\n", paths.len()));

            for (i, path) in paths.iter().enumerate() {
                let sample = category.sample_name_of(path).unwrap_or_default();
                out.push_str(&format!(
                    "  [{:2}] {}: {}\n",
                    i + 1,
                    self.colorize(&sample, |s| s.yellow()),
                    path.display()
                ));
            }
        }
    }

    fn format_summary(&self, out: &mut String, completeness: &CompletenessReport) {
        out.push_str(&format!("\n{}\n", self.rule()));
        out.push_str(&format!("{}\n", self.colorize("Summary:", |s| s.bold())));
        for category in Category::ALL {
            let count = completeness.files_per_category.get(&category).copied().unwrap_or(0);
            out.push_str(&format!("  {category}: {count} files\n"));
        }

        out.push_str(&format!(
            "\n{}\n",
            self.colorize("Sample consistency check:", |s| s.bold())
        ));
        for category in Category::ALL {
            let count = completeness
                .samples_per_category
                .get(&category)
                .map_or(0, |samples| samples.len());
            out.push_str(&format!("  {category}: {count} unique samples\n"));
        }
        out.push_str(&format!(
            "  Total unique samples: {}\n",
            completeness.total_samples()
        ));

        out.push('\n');
        if completeness.is_complete() {
            out.push_str(&format!(
                "{}\n",
                self.colorize("✓ All samples have complete file sets!", |s| s.green())
            ));
        } else {
            let header = format!("Samples with missing files: {}", completeness.incomplete_count());
            out.push_str(&format!("{}\n", self.colorize(&header, |s| s.yellow())));
            for (sample, missing) in completeness.incomplete() {
                let missing: Vec<&str> = missing.iter().map(|c| c.tag()).collect();
                out.push_str(&format!("  {sample}: missing {}\n", missing.join(", ")));
            }
        }

        if !completeness.ambiguous.is_empty() {
            let header = format!(
                "Ambiguous matches (sample name found inside another sample's file): {}",
                completeness.ambiguous.len()
            );
            out.push_str(&format!("\n{}\n", self.colorize(&header, |s| s.yellow())));
            for ambiguous in &completeness.ambiguous {
                out.push_str(&format!(
                    "  {} in {}: {}\n",
                    ambiguous.sample,
                    ambiguous.category,
                    ambiguous.matched_file.display()
                ));
            }
        }
    }
}

impl ReportFormatter for TextFormatter {
    fn format_discovery(
        &self,
        located: &LocatedFiles,
        completeness: &CompletenessReport,
    ) -> Option<String> {
        let mut output = String::new();
        self.format_located(&mut output, located);
        self.format_summary(&mut output, completeness);
        Some(output)
    }

    fn format_written(&self, written: &[WrittenList]) -> Option<String> {
        let mut output = String::new();
        output.push_str(&format!(
            "\n{}\n",
            self.colorize("Saving path-only lists:", |s| s.bold())
        ));

        for list in written {
            match list.kind {
                ListKind::Category(category) => {
                    output.push_str(&format!(
                        "  {category}: {} ({} files)\n",
                        list.path.display(),
                        list.entries
                    ));
                }
                ListKind::All => {
                    output.push_str(&format!("  All files: {}\n", list.path.display()));
                }
            }
        }
        Some(output)
    }

    fn format_mirror(&self, mirror: &MirrorReport) -> Option<String> {
        let mut output = String::new();
        output.push_str(&format!(
            "\n{} {}\n",
            self.colorize("Creating symlinks in:", |s| s.bold()),
            mirror.target_dir.display()
        ));

        for link in &mirror.links {
            let name = link
                .link
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            output.push_str(&format!("  {} {name}\n", self.colorize("✓", |s| s.green())));
        }

        for collision in &mirror.collisions {
            output.push_str(&format!(
                "  {} {} now points to {} (replaced {})\n",
                self.colorize("!", |s| s.yellow()),
                collision.link.display(),
                collision.kept.display(),
                collision.replaced.display()
            ));
        }

        for skipped in &mirror.skipped {
            output.push_str(&format!(
                "  {} skipped {} (already in the symlink directory)\n",
                self.colorize("-", |s| s.dimmed()),
                skipped.display()
            ));
        }
        Some(output)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_discovery(&self, _: &LocatedFiles, _: &CompletenessReport) -> Option<String> {
        None
    }

    fn finalize(&self, report: &ScanReport) -> Result<Option<String>> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(Some(format!("{json}\n")))
    }
}
