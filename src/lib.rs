pub mod error;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use error::{ErrorKind, MirrorError};
pub use models::{CopiedFile, MirrorRoots, MARKER_SUFFIX, MATCHED_EXTENSIONS};
pub use services::{run, run_with_roots, TreeCopyReport};

// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub roots: MirrorRoots,
    pub log_level: String,
    pub report_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            roots: MirrorRoots::default(),
            log_level: "info".to_string(),
            report_json: false,
        }
    }
}
