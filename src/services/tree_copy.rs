use crate::error::{MirrorError, Result};
use crate::models::{CopiedFile, MirrorRoots, TraversalEntry};
use crate::utils::{copy_text_file, ensure_directory, map_destination, matches_extensions};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Mirror every `.cpp`/`.h` file under `source_root` into `destination_root`,
/// renamed to `<name>.txt`.
///
/// Single top-down pass. The first traversal, read or write failure aborts
/// the run; files copied before it stay in place.
pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    source_root: P,
    destination_root: Q,
) -> Result<TreeCopyReport> {
    let source_root = source_root.as_ref();
    let destination_root = destination_root.as_ref();

    info!(
        "Mirroring {} into {}",
        source_root.display(),
        destination_root.display()
    );

    let mut report = TreeCopyReport::start(source_root, destination_root);

    for entry in WalkDir::new(source_root) {
        let entry = entry.map_err(|e| MirrorError::traversal(source_root, e))?;

        // The root itself is never a candidate, even when it is a file.
        if entry.depth() == 0 || !is_file_entry(&entry) {
            continue;
        }

        if !matches_extensions(entry.file_name()) {
            debug!("Skipping {}", entry.path().display());
            report.skipped_files += 1;
            continue;
        }

        let copied = mirror_file(entry.path(), source_root, destination_root, &mut report)?;
        report.copied_files.push(copied);
    }

    report.finished_at = Utc::now();

    info!(
        "Mirror completed. Copied: {}, Skipped: {}, Directories created: {}",
        report.copied_files.len(),
        report.skipped_files,
        report.directories_created
    );

    Ok(report)
}

/// Convenience wrapper over [`run`] for a [`MirrorRoots`] pair
pub fn run_with_roots(roots: &MirrorRoots) -> Result<TreeCopyReport> {
    run(&roots.source, &roots.destination)
}

/// Regular files, plus symlinks that resolve to one
fn is_file_entry(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

fn mirror_file(
    path: &Path,
    source_root: &Path,
    destination_root: &Path,
    report: &mut TreeCopyReport,
) -> Result<CopiedFile> {
    let entry = TraversalEntry::from_path(path).ok_or_else(|| MirrorError::Mapping {
        path: path.to_path_buf(),
        root: source_root.to_path_buf(),
    })?;
    let mapped = map_destination(&entry, source_root, destination_root)?;

    if ensure_directory(&mapped.directory)? {
        debug!("Created directory {}", mapped.directory.display());
        report.directories_created += 1;
    }

    let destination = mapped.file_path();
    let copied = copy_text_file(path, &destination)?;

    debug!(
        "Copied {} -> {} ({} bytes)",
        path.display(),
        destination.display(),
        copied.bytes
    );

    Ok(copied)
}

/// Outcome of a completed run
#[derive(Debug, Clone, Serialize)]
pub struct TreeCopyReport {
    pub source_root: PathBuf,
    pub destination_root: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub copied_files: Vec<CopiedFile>,
    pub skipped_files: usize,
    pub directories_created: usize,
}

impl TreeCopyReport {
    fn start(source_root: &Path, destination_root: &Path) -> Self {
        let now = Utc::now();
        Self {
            source_root: source_root.to_path_buf(),
            destination_root: destination_root.to_path_buf(),
            started_at: now,
            finished_at: now,
            copied_files: Vec::new(),
            skipped_files: 0,
            directories_created: 0,
        }
    }

    pub fn total_seen(&self) -> usize {
        self.copied_files.len() + self.skipped_files
    }

    pub fn total_bytes(&self) -> u64 {
        self.copied_files.iter().map(|file| file.bytes).sum()
    }

    pub fn match_rate(&self) -> f64 {
        let total = self.total_seen();
        if total == 0 {
            0.0
        } else {
            self.copied_files.len() as f64 / total as f64
        }
    }
}
