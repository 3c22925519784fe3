pub mod tree_copy;

pub use tree_copy::{run, run_with_roots, TreeCopyReport};
