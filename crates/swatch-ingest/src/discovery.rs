//! Recursive component file discovery under a configured root.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Extension allow-list: typed source and typed source with markup.
const ALLOWED_EXTENSIONS: &[&str] = &["ts", "tsx"];

fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext))
}

/// Enumerate component source files under `root`.
///
/// Order is whatever the walker yields; callers must not rely on it.
///
/// # Errors
///
/// Returns [`IngestError::MissingRoot`] if `root` does not exist and
/// [`IngestError::NoFilesFound`] if the walk matches nothing.
pub fn discover_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(IngestError::MissingRoot(root.to_path_buf()));
    }

    let files: Vec<PathBuf> = ignore::WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .build()
        .flatten()
        .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
        .map(ignore::DirEntry::into_path)
        .filter(|p| has_allowed_extension(p))
        .collect();

    if files.is_empty() {
        return Err(IngestError::NoFilesFound(root.to_path_buf()));
    }

    tracing::debug!(root = %root.display(), count = files.len(), "discovered component files");
    Ok(files)
}
