use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while mirroring a source tree. Every variant carries the
/// path that failed; the first one aborts the run.
#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Failed to traverse {path:?}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Path {path:?} is not under source root {root:?}")]
    Mapping { path: PathBuf, root: PathBuf },
}

/// Coarse classification of a [`MirrorError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Traversal,
    Read,
    Write,
}

impl MirrorError {
    /// The path the failing operation was working on
    pub fn path(&self) -> &Path {
        match self {
            MirrorError::Traversal { path, .. }
            | MirrorError::Read { path, .. }
            | MirrorError::CreateDir { path, .. }
            | MirrorError::Write { path, .. }
            | MirrorError::Mapping { path, .. } => path,
        }
    }

    /// Which stage of the run failed
    pub fn kind(&self) -> ErrorKind {
        match self {
            MirrorError::Traversal { .. } => ErrorKind::Traversal,
            MirrorError::Read { .. } => ErrorKind::Read,
            // An unmappable path ends up as an invalid destination.
            MirrorError::CreateDir { .. }
            | MirrorError::Write { .. }
            | MirrorError::Mapping { .. } => ErrorKind::Write,
        }
    }

    /// Wrap a walkdir failure, falling back to the traversal root when the
    /// error has no path of its own
    pub(crate) fn traversal(root: &Path, source: walkdir::Error) -> Self {
        let path = source
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());
        MirrorError::Traversal { path, source }
    }
}

pub type Result<T> = std::result::Result<T, MirrorError>;
