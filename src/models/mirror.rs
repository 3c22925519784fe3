use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// File name suffixes that select a file for mirroring (case-sensitive)
pub const MATCHED_EXTENSIONS: [&str; 2] = [".cpp", ".h"];

/// Marker appended to every mirrored file name
pub const MARKER_SUFFIX: &str = ".txt";

/// Source and destination roots of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorRoots {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl MirrorRoots {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

impl Default for MirrorRoots {
    fn default() -> Self {
        Self::new("test", "test1")
    }
}

/// A matching file found during traversal, split into its containing
/// directory and bare file name. Lives only while that file is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalEntry {
    pub directory: PathBuf,
    pub file_name: OsString,
}

impl TraversalEntry {
    /// Split a file path into directory and name; `None` for paths without
    /// a final name component (e.g. `..` or `/`)
    pub fn from_path(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_os_string();
        let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Some(Self {
            directory,
            file_name,
        })
    }

    pub fn source_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}

/// Where a [`TraversalEntry`] lands under the destination root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedPath {
    pub directory: PathBuf,
    pub file_name: OsString,
}

impl MappedPath {
    pub fn file_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }
}
