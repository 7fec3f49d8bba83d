//! Path-list output files
//!
//! One newline-delimited list per category plus a combined, annotated list.

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::Category;
use crate::discovery::LocatedFiles;
use crate::error::{IoOperation, Result, io_err};

/// Extensions stripped from the output base name
const STRIPPED_EXTENSIONS: &[&str] = &[".txt", ".json"];

/// Header of the combined list
const ALL_FILES_HEADER: &str = "# All contamination files";

/// What a written list contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Category(Category),
    All,
}

/// An output file that was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenList {
    pub kind: ListKind,
    pub path: PathBuf,
    /// Number of paths listed
    pub entries: usize,
}

/// Strip a trailing `.txt` or `.json` from the requested output name
///
/// Only the last extension is removed, so `out.json.txt` becomes `out.json`.
pub fn output_base(output: &Path) -> PathBuf {
    let Some(raw) = output.to_str() else {
        return output.to_path_buf();
    };
    let base = STRIPPED_EXTENSIONS
        .iter()
        .find_map(|ext| raw.strip_suffix(ext))
        .unwrap_or(raw);
    PathBuf::from(base)
}

/// Path of the dedicated list for one category
pub fn category_list_path(base: &Path, category: Category) -> PathBuf {
    suffixed(base, &format!("_{}_paths.txt", category.tag()))
}

/// Path of the combined list
pub fn combined_list_path(base: &Path) -> PathBuf {
    suffixed(base, "_all_paths.txt")
}

fn suffixed(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Write all path lists for `located` next to `output`
///
/// Returns the written files in write order: one per category, then the
/// combined list.
pub fn write_path_lists(located: &LocatedFiles, output: &Path) -> Result<Vec<WrittenList>> {
    let base = output_base(output);
    let mut written = Vec::with_capacity(Category::ALL.len() + 1);

    for (category, paths) in located.iter() {
        let path = category_list_path(&base, category);
        write_list(&path, |out| {
            paths.iter().try_for_each(|file| write_path_line(out, file))
        })?;
        log::debug!("Wrote {} paths to {}", paths.len(), path.display());

        written.push(WrittenList {
            kind: ListKind::Category(category),
            path,
            entries: paths.len(),
        });
    }

    let path = combined_list_path(&base);
    write_list(&path, |out| {
        writeln!(out, "{ALL_FILES_HEADER}")?;
        for (category, paths) in located.iter() {
            writeln!(out, "# {} FILES", category.tag().to_uppercase())?;
            for file in paths {
                write_path_line(out, file)?;
            }
            writeln!(out)?;
        }
        Ok(())
    })?;
    log::debug!("Wrote combined list to {}", path.display());

    written.push(WrittenList {
        kind: ListKind::All,
        path,
        entries: located.total(),
    });

    Ok(written)
}

/// Write a path as its raw bytes so non-UTF-8 names survive
fn write_path_line(out: &mut impl Write, path: &Path) -> std::io::Result<()> {
    out.write_all(path.as_os_str().as_encoded_bytes())?;
    out.write_all(b"\n")
}

fn write_list<F>(path: &Path, body: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let file = File::create(path).map_err(io_err(IoOperation::Write, path))?;
    let mut out = BufWriter::new(file);
    body(&mut out).map_err(io_err(IoOperation::Write, path))?;
    out.flush().map_err(io_err(IoOperation::Write, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_located() -> LocatedFiles {
        let root = Path::new("data");
        LocatedFiles::from_files(
            root,
            true,
            [
                (Category::GetPileupSummaries, root.join("A_getpileupsummaries.table")),
                (Category::GetPileupSummaries, root.join("B_getpileupsummaries.table")),
                (Category::Segments, root.join("x/B_segments.table")),
            ],
        )
    }

    #[test]
    fn test_output_base_strips_known_extensions() {
        assert_eq!(output_base(Path::new("out.txt")), PathBuf::from("out"));
        assert_eq!(output_base(Path::new("out.json")), PathBuf::from("out"));
        assert_eq!(output_base(Path::new("dir/out")), PathBuf::from("dir/out"));
        assert_eq!(output_base(Path::new("out.tsv")), PathBuf::from("out.tsv"));
        // Only a trailing extension is removed
        assert_eq!(output_base(Path::new("a.txt.b")), PathBuf::from("a.txt.b"));
        assert_eq!(output_base(Path::new("out.json.txt")), PathBuf::from("out.json"));
        assert_eq!(output_base(Path::new("out.txt.json")), PathBuf::from("out.txt"));
    }

    #[test]
    fn test_list_paths() {
        let base = Path::new("results/contam");
        assert_eq!(
            category_list_path(base, Category::Segments),
            PathBuf::from("results/contam_segments_paths.txt")
        );
        assert_eq!(
            combined_list_path(base),
            PathBuf::from("results/contam_all_paths.txt")
        );
    }

    #[test]
    fn test_write_path_lists_contents() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("contam.txt");

        let written = write_path_lists(&sample_located(), &output).unwrap();
        assert_eq!(written.len(), 4);
        assert_eq!(written[3].kind, ListKind::All);
        assert_eq!(written[3].entries, 3);

        let pileup =
            fs::read_to_string(dir.path().join("contam_getpileupsummaries_paths.txt")).unwrap();
        assert_eq!(
            pileup,
            "data/A_getpileupsummaries.table\ndata/B_getpileupsummaries.table\n"
        );

        let calc =
            fs::read_to_string(dir.path().join("contam_calculatecontamination_paths.txt")).unwrap();
        assert_eq!(calc, "");

        let all = fs::read_to_string(dir.path().join("contam_all_paths.txt")).unwrap();
        assert_eq!(
            all,
            "# All contamination files\n\
             # GETPILEUPSUMMARIES FILES\n\
             data/A_getpileupsummaries.table\n\
             data/B_getpileupsummaries.table\n\
             \n\
             # CALCULATECONTAMINATION FILES\n\
             \n\
             # SEGMENTS FILES\n\
             data/x/B_segments.table\n\
             \n"
        );
    }

    #[test]
    fn test_write_path_lists_overwrites_previous_output() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("run");
        let stale = dir.path().join("run_segments_paths.txt");
        fs::write(&stale, "stale/path\nother\n").unwrap();

        write_path_lists(&sample_located(), &output).unwrap();
        assert_eq!(fs::read_to_string(stale).unwrap(), "data/x/B_segments.table\n");
    }

    #[test]
    fn test_write_path_lists_unwritable_destination() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("missing-dir").join("contam");

        let err = write_path_lists(&sample_located(), &output).unwrap_err();
        assert!(err.is_filesystem());
        assert_eq!(
            err.path(),
            Some(dir.path().join("missing-dir/contam_getpileupsummaries_paths.txt").as_path())
        );
    }
}
