//! Helpers for cleaning names before they touch the filesystem or a log line.
//!
//! Spans and log lines carry file names only, never the full incoming or
//! library path.

use std::path::Path;

/// Characters that cannot appear in a library folder name.
pub const BANNED_CHARACTERS: [char; 8] = ['/', '\\', ':', '*', '?', '"', '<', '>'];

/// Returns only the filename component of a path (no directory).
pub fn redact_path(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
        .to_string()
}

/// Removes every banned character from `name`.
pub fn strip_banned_characters(name: &str, banned: &[char]) -> String {
    name.chars().filter(|c| !banned.contains(c)).collect()
}
