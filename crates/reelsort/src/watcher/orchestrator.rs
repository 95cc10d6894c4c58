use std::fmt;

use log::{debug, info, warn};
use tracing::info_span;

use crate::classifier::{ContentClassifier, DirFile, ExtensionClassifier};
use crate::config::Settings;
use crate::entry::{Entry, EntryKind};
use crate::lookup::MetadataLookup;
use crate::probe::is_in_use;
use crate::sanitize;
use crate::status::StatusTag;
use crate::storage::{Disposition, Placement, PlacementOutcome, PlacementResolver, SampleRemover};
use crate::title::TitleExtractor;
use crate::watcher::scanner::{list_files, list_subdirectories};

const DVD_FOLDER: &str = "VIDEO_TS";

/// What happened to one entry during a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Carries a status marker from an earlier cycle. Not touched.
    AlreadyTagged(StatusTag),
    /// A thumbnail cache, or a root file that is not a video.
    Ignored,
    /// Still being written. Retried next cycle.
    InUse,
    /// A directory without video files. Not touched.
    NotVideo,
    /// The directory could not be listed. Retried next cycle.
    Unreadable,
    Placed(PlacementOutcome),
}

/// Counts per outcome for one poll cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub moved: usize,
    pub tagged_skip: usize,
    pub tagged_tv: usize,
    pub tagged_duplicate: usize,
    pub already_in_library: usize,
    pub in_use: usize,
    pub already_tagged: usize,
    pub ignored: usize,
    pub failed: usize,
}

impl CycleReport {
    pub fn record(&mut self, outcome: &EntryOutcome) {
        match outcome {
            EntryOutcome::AlreadyTagged(_) => self.already_tagged += 1,
            EntryOutcome::Ignored | EntryOutcome::NotVideo => self.ignored += 1,
            EntryOutcome::InUse => self.in_use += 1,
            EntryOutcome::Unreadable => self.failed += 1,
            EntryOutcome::Placed(placed) => match placed {
                PlacementOutcome::Moved { .. } => self.moved += 1,
                PlacementOutcome::Tagged { tag, .. } => match tag {
                    StatusTag::Skip => self.tagged_skip += 1,
                    StatusTag::Tv => self.tagged_tv += 1,
                    StatusTag::Duplicate => self.tagged_duplicate += 1,
                },
                PlacementOutcome::AlreadyInLibrary { .. } => self.already_in_library += 1,
                PlacementOutcome::Untouched => self.failed += 1,
            },
        }
    }

    /// Number of entries that were renamed or moved.
    pub fn changed(&self) -> usize {
        self.moved + self.tagged_skip + self.tagged_tv + self.tagged_duplicate
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "moved={} skip={} tv={} duplicate={} in_library={} in_use={} tagged={} ignored={} failed={}",
            self.moved,
            self.tagged_skip,
            self.tagged_tv,
            self.tagged_duplicate,
            self.already_in_library,
            self.in_use,
            self.already_tagged,
            self.ignored,
            self.failed
        )
    }
}

/// Runs one incoming entry through probe, classify, clean, extract and
/// place.
pub struct EntryOrchestrator<P, L> {
    settings: OrchestratorSettings,
    classifier: ContentClassifier,
    extractor: TitleExtractor<L>,
    placement: P,
}

/// The slice of [`Settings`] the orchestrator reads directly.
struct OrchestratorSettings {
    incoming_dir: std::path::PathBuf,
    filenames_to_ignore: Vec<String>,
    organize_audio: bool,
}

impl<L: MetadataLookup> EntryOrchestrator<PlacementResolver, L> {
    /// Production constructor. Placement goes to the configured libraries.
    pub fn from_settings(settings: &Settings, lookup: L) -> Self {
        Self::new(settings, PlacementResolver::from_settings(settings), lookup)
    }
}

impl<P: Placement, L: MetadataLookup> EntryOrchestrator<P, L> {
    pub fn new(settings: &Settings, placement: P, lookup: L) -> Self {
        Self {
            settings: OrchestratorSettings {
                incoming_dir: settings.incoming_dir.clone(),
                filenames_to_ignore: settings.filenames_to_ignore.clone(),
                organize_audio: settings.organize_audio,
            },
            classifier: ContentClassifier::from_settings(settings),
            extractor: TitleExtractor::new(ExtensionClassifier::from_settings(settings), lookup),
            placement,
        }
    }

    fn extensions(&self) -> &ExtensionClassifier {
        self.classifier.extensions()
    }

    pub fn process(&self, entry: &Entry) -> EntryOutcome {
        let path = entry.path_in(&self.settings.incoming_dir);
        let _span = info_span!("entry",
            name = %sanitize::redact_path(&path),
            kind = %entry.kind,
        )
        .entered();

        let outcome = match entry.kind {
            EntryKind::Directory => self.process_directory(entry),
            EntryKind::File => self.process_root_file(entry),
        };
        debug!("{} -> {:?}", entry.name, outcome);
        outcome
    }

    pub fn process_directory(&self, entry: &Entry) -> EntryOutcome {
        if let Some(tag) = entry.status_tag() {
            debug!("{} already tagged {}", entry.name, tag);
            return EntryOutcome::AlreadyTagged(tag);
        }

        let dir = entry.path_in(&self.settings.incoming_dir);
        let files = match list_files(&dir) {
            Ok(files) => files,
            Err(e) => {
                warn!("{}", e);
                return EntryOutcome::Unreadable;
            }
        };

        if files.is_empty() {
            return self.process_fileless_directory(entry);
        }

        info!("Checking {} in incoming directory", entry.name);
        if is_in_use(&dir.join(&files[0].name)) {
            info!("{} is currently in use. Skipping for now", entry.name);
            return EntryOutcome::InUse;
        }

        let verdict = self.classifier.classify(&files);
        if !verdict.is_video_folder {
            return self.process_non_video_directory(entry, &files);
        }

        if verdict.is_tv {
            info!("{} looks like a TV show", entry.name);
            return EntryOutcome::Placed(self.placement.resolve(entry, Disposition::Tv));
        }

        let cleaned = SampleRemover::new(&self.classifier).clean(&dir, &files);
        let remaining: Vec<DirFile> = files
            .into_iter()
            .filter(|f| !cleaned.deleted.contains(&f.name))
            .collect();
        if !self.classifier.is_video_folder(&remaining) {
            // Left for the empty-folder check on the next cycle.
            info!("{} holds no video after cleaning", entry.name);
            return EntryOutcome::NotVideo;
        }

        self.extract_and_place(entry)
    }

    /// Empty folders are tagged SKIP unless they hold a DVD structure.
    fn process_fileless_directory(&self, entry: &Entry) -> EntryOutcome {
        let dir = entry.path_in(&self.settings.incoming_dir);
        let is_dvd = match list_subdirectories(&dir) {
            Ok(subdirs) => subdirs.iter().any(|d| d.eq_ignore_ascii_case(DVD_FOLDER)),
            Err(e) => {
                warn!("{}", e);
                return EntryOutcome::Unreadable;
            }
        };

        if !is_dvd {
            info!("{} contains no files", entry.name);
            return EntryOutcome::Placed(self.placement.resolve(entry, Disposition::Unrecognized));
        }

        if is_in_use(&dir) {
            info!("{} is currently in use. Skipping for now", entry.name);
            return EntryOutcome::InUse;
        }
        info!("{} is a DVD rip", entry.name);
        self.extract_and_place(entry)
    }

    fn process_non_video_directory(&self, entry: &Entry, files: &[DirFile]) -> EntryOutcome {
        if self.settings.organize_audio && self.classifier.is_audio_folder(files) {
            info!("{} looks like an audio folder", entry.name);
            return EntryOutcome::Placed(self.placement.resolve(entry, Disposition::Audio));
        }
        debug!("{} holds no video files", entry.name);
        EntryOutcome::NotVideo
    }

    pub fn process_root_file(&self, entry: &Entry) -> EntryOutcome {
        if self.is_ignored(&entry.name) {
            return EntryOutcome::Ignored;
        }
        if let Some(tag) = entry.status_tag() {
            return EntryOutcome::AlreadyTagged(tag);
        }
        if !self.extensions().is_video(&entry.name) {
            return EntryOutcome::Ignored;
        }

        if is_in_use(&entry.path_in(&self.settings.incoming_dir)) {
            info!("{} is currently in use. Skipping for now", entry.name);
            return EntryOutcome::InUse;
        }

        info!("Found movie file {} in incoming directory", entry.name);
        self.extract_and_place(entry)
    }

    fn extract_and_place(&self, entry: &Entry) -> EntryOutcome {
        let disposition = match self.extractor.extract(&entry.name) {
            Some(found) => {
                info!("Recognized {} as {}", entry.name, found.canonical_name());
                Disposition::Movie(found)
            }
            None => {
                info!("Could not find a title and year for {}", entry.name);
                Disposition::Unrecognized
            }
        };
        EntryOutcome::Placed(self.placement.resolve(entry, disposition))
    }

}
