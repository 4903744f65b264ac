// Cache path utilities.
// Locates the durable cache directory and maps cache keys to file names.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Base cache directory (e.g. ~/.cache/venue-scout on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "venue-scout").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Directory holding durable search entries.
pub fn search_dir() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("search"))
}

/// File for one durable entry under `dir`.
pub fn entry_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", sanitize_name(key)))
}

/// Sanitize a key for use as a file name.
/// Replaces characters that are not portable in paths with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | ' ' => '_',
            _ => c,
        })
        .collect()
}
