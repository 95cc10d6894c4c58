//! Best-effort "is something still writing this?" check.
//!
//! The path is renamed to a unique sibling and straight back. A writer that
//! holds the file open on a platform with mandatory locking makes the first
//! rename fail. A writer that starts between the restore and the caller's
//! next step is not detected.
//!
//! Fails closed: any error means "in use".

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::{debug, error};

pub fn is_in_use(path: &Path) -> bool {
    let Some(probe_path) = probe_sibling(path) else {
        debug!("Cannot build a probe name for {}; treating as in use", path.display());
        return true;
    };

    debug!("Testing to see if {} is in use", path.display());

    if let Err(e) = std::fs::rename(path, &probe_path) {
        debug!("{} is in use: {}", path.display(), e);
        return true;
    }

    if let Err(e) = std::fs::rename(&probe_path, path) {
        error!(
            "Failed to restore {} from probe name {}: {}",
            path.display(),
            probe_path.display(),
            e
        );
        return true;
    }

    debug!("{} is not in use", path.display());
    false
}

fn probe_sibling(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?;
    let mut probe_name = OsString::from(name);
    probe_name.push(format!(".probe-{}", uuid::Uuid::new_v4().simple()));
    Some(path.with_file_name(probe_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_idle_file_is_free_and_restored() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("The.Matrix.1999.mkv");
        std::fs::write(&file, b"data").unwrap();

        assert!(!is_in_use(&file));
        assert!(file.exists());
        assert_eq!(std::fs::read(&file).unwrap(), b"data");

        let names: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![OsString::from("The.Matrix.1999.mkv")]);
    }

    #[test]
    fn test_idle_directory_is_free() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("Inception (2010)");
        std::fs::create_dir(&dir).unwrap();

        assert!(!is_in_use(&dir));
        assert!(dir.is_dir());
    }

    #[test]
    fn test_missing_path_is_in_use() {
        let temp_dir = TempDir::new().unwrap();
        assert!(is_in_use(&temp_dir.path().join("gone.mkv")));
    }

    #[test]
    fn test_root_has_no_probe_name() {
        assert!(probe_sibling(Path::new("/")).is_none());
        assert!(is_in_use(Path::new("/")));
    }

    #[test]
    fn test_probe_sibling_stays_in_same_directory() {
        let probe = probe_sibling(Path::new("/srv/incoming/a.mkv")).unwrap();
        assert_eq!(probe.parent(), Some(Path::new("/srv/incoming")));
        assert!(probe
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("a.mkv.probe-"));
    }
}
