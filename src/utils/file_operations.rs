use crate::error::{MirrorError, Result};
use crate::models::{CopiedFile, MappedPath, TraversalEntry, MARKER_SUFFIX, MATCHED_EXTENSIONS};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;

/// Check if a file name ends with one of the recognized extensions.
/// Exact, case-sensitive suffix match on the raw name
pub fn matches_extensions(file_name: &OsStr) -> bool {
    let name = file_name.as_encoded_bytes();
    MATCHED_EXTENSIONS
        .iter()
        .any(|ext| name.ends_with(ext.as_bytes()))
}

/// `<file_name><MARKER_SUFFIX>`, original extension kept
pub fn destination_file_name(file_name: &OsStr) -> OsString {
    let mut name = file_name.to_os_string();
    name.push(MARKER_SUFFIX);
    name
}

/// Map an entry found under `source_root` to its place under
/// `destination_root`.
///
/// The source root is stripped from the entry's directory once, as a path
/// prefix, and the remainder is re-rooted. Later components that happen to
/// spell the root again are left alone.
pub fn map_destination(
    entry: &TraversalEntry,
    source_root: &Path,
    destination_root: &Path,
) -> Result<MappedPath> {
    let relative = entry
        .directory
        .strip_prefix(source_root)
        .map_err(|_| MirrorError::Mapping {
            path: entry.source_path(),
            root: source_root.to_path_buf(),
        })?;

    let directory = if relative.as_os_str().is_empty() {
        destination_root.to_path_buf()
    } else {
        destination_root.join(relative)
    };

    Ok(MappedPath {
        directory,
        file_name: destination_file_name(&entry.file_name),
    })
}

/// Create `directory` and any missing parents.
/// Returns `true` when something had to be created
pub fn ensure_directory(directory: &Path) -> Result<bool> {
    if directory.is_dir() {
        return Ok(false);
    }

    fs::create_dir_all(directory).map_err(|source| MirrorError::CreateDir {
        path: directory.to_path_buf(),
        source,
    })?;

    Ok(true)
}

/// Copy a text file verbatim, truncating any existing destination.
/// Content that is not valid UTF-8 fails as a read error
pub fn copy_text_file(source: &Path, destination: &Path) -> Result<CopiedFile> {
    let content = fs::read_to_string(source).map_err(|e| MirrorError::Read {
        path: source.to_path_buf(),
        source: e,
    })?;

    fs::write(destination, &content).map_err(|e| MirrorError::Write {
        path: destination.to_path_buf(),
        source: e,
    })?;

    Ok(CopiedFile::new(
        source.to_path_buf(),
        destination.to_path_buf(),
        &content,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_matches_extensions() {
        assert!(matches_extensions(OsStr::new("main.cpp")));
        assert!(matches_extensions(OsStr::new("widget.h")));
        assert!(!matches_extensions(OsStr::new("notes.txt")));
        assert!(!matches_extensions(OsStr::new("widget.hpp")));
        assert!(!matches_extensions(OsStr::new("main.cpp.bak")));
    }

    #[test]
    fn test_matches_extensions_case_sensitive() {
        assert!(!matches_extensions(OsStr::new("MAIN.CPP")));
        assert!(!matches_extensions(OsStr::new("widget.H")));
    }

    #[test]
    fn test_matches_extensions_bare_suffix() {
        // A dotfile named exactly like the extension still ends with it.
        assert!(matches_extensions(OsStr::new(".h")));
    }

    #[test]
    fn test_destination_file_name_keeps_extension() {
        assert_eq!(
            destination_file_name(OsStr::new("file.h")),
            OsString::from("file.h.txt")
        );
    }

    #[test]
    fn test_map_destination_nested() {
        let entry = TraversalEntry::from_path(Path::new("src/a/b/file.h")).unwrap();
        let mapped = map_destination(&entry, Path::new("src"), Path::new("out")).unwrap();
        assert_eq!(mapped.file_path(), PathBuf::from("out/a/b/file.h.txt"));
    }

    #[test]
    fn test_map_destination_at_root() {
        let entry = TraversalEntry::from_path(Path::new("src/x.cpp")).unwrap();
        let mapped = map_destination(&entry, Path::new("src"), Path::new("out")).unwrap();
        assert_eq!(mapped.directory, PathBuf::from("out"));
        assert_eq!(mapped.file_path(), PathBuf::from("out/x.cpp.txt"));
    }

    #[test]
    fn test_map_destination_repeated_root_name() {
        let entry = TraversalEntry::from_path(Path::new("test/test/inner/test/a.cpp")).unwrap();
        let mapped = map_destination(&entry, Path::new("test"), Path::new("test1")).unwrap();
        assert_eq!(
            mapped.file_path(),
            PathBuf::from("test1/test/inner/test/a.cpp.txt")
        );
    }

    #[test]
    fn test_map_destination_outside_root() {
        let entry = TraversalEntry::from_path(Path::new("other/a.cpp")).unwrap();
        let err = map_destination(&entry, Path::new("src"), Path::new("out")).unwrap_err();
        assert!(matches!(err, MirrorError::Mapping { .. }));
    }
}
