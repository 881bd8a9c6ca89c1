//! Root directory resolution
//!
//! The tool lives one level below the directory it manages
//! (e.g. `<root>/bin/handoff-snapshot`), so the root is the parent of the
//! directory containing the executable.

use std::path::{Path, PathBuf};

use crate::error::SnapshotError;

/// Resolve the root directory from the running executable's location.
pub fn root_from_exe() -> Result<PathBuf, SnapshotError> {
    let exe = std::env::current_exe()
        .map_err(|e| SnapshotError::ResolveRoot(format!("current executable: {}", e)))?;
    // Resolve symlinks so a linked binary still maps to its real tree
    let exe = exe.canonicalize().unwrap_or(exe);
    root_for_exe(&exe)
}

/// Get the root for a given executable path: the grandparent of `exe`.
pub fn root_for_exe(exe: &Path) -> Result<PathBuf, SnapshotError> {
    exe.parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            SnapshotError::ResolveRoot(format!("{} has no parent directory", exe.display()))
        })
}
