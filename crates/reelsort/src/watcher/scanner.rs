use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::classifier::DirFile;
use crate::entry::Entry;
use crate::error::WatchError;

/// Top-level contents of the incoming directory, directories first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IncomingListing {
    pub directories: Vec<Entry>,
    pub files: Vec<Entry>,
}

pub struct IncomingScanner {
    incoming_dir: PathBuf,
}

impl IncomingScanner {
    pub fn new<P: AsRef<Path>>(incoming_dir: P) -> Self {
        Self {
            incoming_dir: incoming_dir.as_ref().to_path_buf(),
        }
    }

    pub fn incoming_dir(&self) -> &Path {
        &self.incoming_dir
    }

    /// Lists the immediate children of the incoming directory, sorted by
    /// name. Failing to read the root itself is an error; an unreadable
    /// child is logged and skipped.
    pub fn scan(&self) -> Result<IncomingListing, WatchError> {
        let mut listing = IncomingListing::default();

        for entry in immediate_children(&self.incoming_dir) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(WatchError::ScanFailed {
                        path: self.incoming_dir.clone(),
                        source: e,
                    });
                }
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let Some(name) = entry.file_name().to_str() else {
                warn!("Skipping non UTF-8 name: {:?}", entry.file_name());
                continue;
            };

            if entry.path().is_dir() {
                listing.directories.push(Entry::directory(name));
            } else {
                listing.files.push(Entry::file(name));
            }
        }

        debug!(
            "Scanned {} directories and {} files in {}",
            listing.directories.len(),
            listing.files.len(),
            self.incoming_dir.display()
        );
        Ok(listing)
    }
}

fn immediate_children(dir: &Path) -> walkdir::IntoIter {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
}

/// Immediate regular files of `dir` with their sizes, sorted by name.
pub fn list_files(dir: &Path) -> Result<Vec<DirFile>, WatchError> {
    let mut files = Vec::new();
    for entry in immediate_children(dir) {
        let entry = entry.map_err(|e| WatchError::ScanFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        // Follows symlinks, unlike DirEntry::metadata.
        let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        files.push(DirFile::new(name, size));
    }
    Ok(files)
}

/// Names of the immediate subdirectories of `dir`, sorted.
pub fn list_subdirectories(dir: &Path) -> Result<Vec<String>, WatchError> {
    let mut dirs = Vec::new();
    for entry in immediate_children(dir) {
        let entry = entry.map_err(|e| WatchError::ScanFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;
        if entry.path().is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                dirs.push(name.to_string());
            }
        }
    }
    Ok(dirs)
}
