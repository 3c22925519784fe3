use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Record of one completed copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopiedFile {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub bytes: u64,
    pub sha256: String,
}

impl CopiedFile {
    /// Build the record from the content that was written
    pub fn new(source: PathBuf, destination: PathBuf, content: &str) -> Self {
        Self {
            source,
            destination,
            bytes: content.len() as u64,
            sha256: content_digest(content.as_bytes()),
        }
    }
}

/// Lowercase hex SHA-256 of a buffer
pub fn content_digest(content: &[u8]) -> String {
    format!("{:x}", Sha256::digest(content))
}
