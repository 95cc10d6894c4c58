use std::path::{Path, PathBuf};

use log::warn;
use walkdir::WalkDir;

use crate::error::StorageError;

/// True when something (file, directory or dangling symlink) sits at `path`.
pub fn path_taken(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Moves a file or directory from `src` to `dst`. Never replaces an existing
/// destination. Uses `rename` first and falls back to copy + delete, which
/// covers a library on another filesystem.
pub fn move_path(src: &Path, dst: &Path) -> Result<(), StorageError> {
    if path_taken(dst) {
        return Err(StorageError::AlreadyExists(dst.to_path_buf()));
    }

    if std::fs::rename(src, dst).is_ok() {
        return Ok(());
    }

    let move_error = |e: std::io::Error| StorageError::MoveFile {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source: e,
    };

    if src.is_dir() {
        if let Err(e) = copy_dir(src, dst) {
            if let Err(cleanup) = std::fs::remove_dir_all(dst) {
                warn!(
                    "Failed to clean up partial copy at {}: {}",
                    dst.display(),
                    cleanup
                );
            }
            return Err(move_error(e));
        }
        std::fs::remove_dir_all(src).map_err(move_error)?;
    } else {
        std::fs::copy(src, dst).map_err(move_error)?;
        std::fs::remove_file(src).map_err(move_error)?;
    }
    Ok(())
}

fn copy_dir(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Renames `directory/from` to `directory/to` without replacing anything.
pub fn rename_in_place(directory: &Path, from: &str, to: &str) -> Result<PathBuf, StorageError> {
    let src = directory.join(from);
    let dst = directory.join(to);

    if path_taken(&dst) {
        return Err(StorageError::AlreadyExists(dst));
    }

    std::fs::rename(&src, &dst).map_err(|e| StorageError::Rename {
        from: src,
        to: dst.clone(),
        source: e,
    })?;
    Ok(dst)
}

/// Creates exactly one new directory. Fails if it already exists.
pub fn create_directory(path: &Path) -> Result<(), StorageError> {
    std::fs::create_dir(path).map_err(|e| StorageError::CreateDirectory {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Removes a directory only if it is empty.
pub fn remove_empty_directory(path: &Path) -> Result<(), StorageError> {
    std::fs::remove_dir(path).map_err(|e| StorageError::Delete {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn delete_file(path: &Path) -> Result<(), StorageError> {
    std::fs::remove_file(path).map_err(|e| StorageError::Delete {
        path: path.to_path_buf(),
        source: e,
    })
}
