use std::path::Path;

use log::{info, warn};

use crate::classifier::{ContentClassifier, DirFile};
use crate::storage::filesystem::delete_file;

/// What a cleaning pass did to one movie directory.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanReport {
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

/// Deletes sample clips and junk side files from a movie directory before
/// it is placed.
pub struct SampleRemover<'a> {
    classifier: &'a ContentClassifier,
}

impl<'a> SampleRemover<'a> {
    pub fn new(classifier: &'a ContentClassifier) -> Self {
        Self { classifier }
    }

    /// A file is removed when it is a sample-sized video, or when its
    /// extension is on the junk list. Failures are logged and skipped.
    pub fn clean(&self, directory: &Path, files: &[DirFile]) -> CleanReport {
        let extensions = self.classifier.extensions();
        let mut report = CleanReport::default();

        for file in files {
            let sample = extensions.is_video(&file.name) && self.classifier.is_sample(file);
            let junk = extensions.is_deletable_junk(&file.name);
            if !sample && !junk {
                continue;
            }

            if sample {
                info!("Deleting sample: {}", file.name);
            } else {
                info!("Deleting extra file: {}", file.name);
            }

            match delete_file(&directory.join(&file.name)) {
                Ok(()) => report.deleted.push(file.name.clone()),
                Err(e) => {
                    warn!("{}", e);
                    report.failed.push(file.name.clone());
                }
            }
        }
        report
    }
}
