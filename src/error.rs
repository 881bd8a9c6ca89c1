//! Error types for snapshot operations

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to create archive directory {path}: {source}")]
    CreateArchiveDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read document {path}: {source}")]
    ReadDocument {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write snapshot {path}: {source}")]
    WriteSnapshot {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to rewrite document {path}: {source}")]
    WriteDocument {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot resolve root directory: {0}")]
    ResolveRoot(String),
}
