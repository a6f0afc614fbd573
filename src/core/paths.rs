//! Path normalization utilities
//!
//! Plan paths are stored with '/' as separator and resolved against the run root.

use std::path::{Path, PathBuf};

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Resolve a plan path against the root. Absolute paths are kept as given.
pub fn resolve(root: &Path, relative: &str) -> PathBuf {
    let native = relative.replace('/', std::path::MAIN_SEPARATOR_STR);
    let candidate = Path::new(&native);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        root.join(candidate)
    }
}

/// Display form of a user-supplied file: relative to root when it lives under it
pub fn display_path(path: &Path, root: &Path) -> String {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    make_relative(&absolute, root).unwrap_or_else(|| normalize_path(path))
}
