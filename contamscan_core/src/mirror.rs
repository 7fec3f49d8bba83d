//! Symlink mirror of discovered tables
//!
//! Every located file gets a link `<target>/<basename>` pointing at its
//! absolute path. Existing entries at the link path are replaced, so two
//! sources sharing a base name end with the last one linked. Files already
//! inside the target directory, such as links from an earlier run, are
//! skipped so a link never points at itself.

use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::discovery::LocatedFiles;
use crate::error::{IoOperation, Result, io_err};

/// A link created by the mirror
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MirroredLink {
    pub link: PathBuf,
    pub target: PathBuf,
}

/// Two sources mapped to the same link name within one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkCollision {
    pub link: PathBuf,
    /// Source that was linked first and then replaced
    pub replaced: PathBuf,
    /// Source the link points to afterwards
    pub kept: PathBuf,
}

/// Outcome of mirroring
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MirrorReport {
    pub target_dir: PathBuf,
    pub links: Vec<MirroredLink>,
    pub collisions: Vec<LinkCollision>,
    /// Sources that live in the target directory itself
    pub skipped: Vec<PathBuf>,
}

/// Mirror every located file into `target_dir` as a symbolic link
pub fn mirror_symlinks(located: &LocatedFiles, target_dir: &Path) -> Result<MirrorReport> {
    fs::create_dir_all(target_dir).map_err(io_err(IoOperation::CreateDir, target_dir))?;
    log::debug!("Mirroring {} files into {}", located.total(), target_dir.display());

    let mut report = MirrorReport {
        target_dir: target_dir.to_path_buf(),
        ..Default::default()
    };
    let mut linked_from: HashMap<PathBuf, PathBuf> = HashMap::new();
    let canonical_target =
        fs::canonicalize(target_dir).map_err(io_err(IoOperation::Resolve, target_dir))?;

    for (_, paths) in located.iter() {
        for source in paths {
            let Some(file_name) = source.file_name() else {
                continue;
            };
            if is_inside(source, &canonical_target) {
                log::warn!(
                    "Skipping {}: it is inside the symlink directory",
                    source.display()
                );
                report.skipped.push(source.clone());
                continue;
            }
            let link = target_dir.join(file_name);
            let target = std::path::absolute(source).map_err(io_err(IoOperation::Resolve, source))?;

            replace_link(&link, &target)?;
            log::debug!("{} -> {}", link.display(), target.display());

            if let Some(previous) = linked_from.insert(link.clone(), target.clone()) {
                log::warn!(
                    "{} replaced: {} is superseded by {}",
                    link.display(),
                    previous.display(),
                    target.display()
                );
                report.collisions.push(LinkCollision {
                    link: link.clone(),
                    replaced: previous,
                    kept: target.clone(),
                });
                report.links.retain(|l| l.link != link);
            }

            report.links.push(MirroredLink { link, target });
        }
    }

    Ok(report)
}

/// Whether `source` sits directly in the canonical directory `dir`
fn is_inside(source: &Path, dir: &Path) -> bool {
    let parent = source
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::canonicalize(parent).is_ok_and(|parent| parent == dir)
}

/// Remove whatever is at `link` (including dangling links) and relink
fn replace_link(link: &Path, target: &Path) -> Result<()> {
    if fs::symlink_metadata(link).is_ok() {
        fs::remove_file(link).map_err(io_err(IoOperation::Remove, link))?;
    }
    symlink_file(target, link).map_err(io_err(IoOperation::Symlink, link))
}

#[cfg(unix)]
fn symlink_file(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink_file(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
