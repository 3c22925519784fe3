pub mod copied_file;
pub mod mirror;

pub use copied_file::{content_digest, CopiedFile};
pub use mirror::{MappedPath, MirrorRoots, TraversalEntry, MARKER_SUFFIX, MATCHED_EXTENSIONS};
