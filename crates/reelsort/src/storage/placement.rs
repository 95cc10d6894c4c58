//! Terminal filesystem actions for one incoming entry.
//!
//! Every path through [`PlacementResolver::resolve`] ends in exactly one of:
//! a status-tag rename in place, a move into a library, or leaving the entry
//! alone. Nothing here ever overwrites an existing destination.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::Settings;
use crate::entry::{Entry, EntryKind};
use crate::sanitize::strip_banned_characters;
use crate::status::StatusTag;
use crate::storage::filesystem::{
    create_directory, move_path, path_taken, remove_empty_directory, rename_in_place,
};
use crate::title::TitleYear;

/// What the orchestrator decided the entry is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// No title/year could be extracted.
    Unrecognized,
    Tv,
    Movie(TitleYear),
    /// A non-video folder full of audio files.
    Audio,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// Renamed in place to carry a status marker.
    Tagged { tag: StatusTag, path: PathBuf },
    /// Relocated into a library.
    Moved { destination: PathBuf },
    /// The library already holds this exact file. The source stays where it is.
    AlreadyInLibrary { existing: PathBuf },
    /// A tag rename failed. The entry is retried next cycle.
    Untouched,
}

/// Terminal action capability, injected into the orchestrator.
pub trait Placement {
    fn resolve(&self, entry: &Entry, disposition: Disposition) -> PlacementOutcome;
}

impl<T: Placement + ?Sized> Placement for &T {
    fn resolve(&self, entry: &Entry, disposition: Disposition) -> PlacementOutcome {
        (**self).resolve(entry, disposition)
    }
}

/// Filesystem-backed placement into the movie and audio libraries.
#[derive(Debug, Clone)]
pub struct PlacementResolver {
    incoming_dir: PathBuf,
    movie_dir: PathBuf,
    audio_dir: PathBuf,
    banned_characters: Vec<char>,
}

impl PlacementResolver {
    pub fn new(
        incoming_dir: impl Into<PathBuf>,
        movie_dir: impl Into<PathBuf>,
        audio_dir: impl Into<PathBuf>,
        banned_characters: Vec<char>,
    ) -> Self {
        Self {
            incoming_dir: incoming_dir.into(),
            movie_dir: movie_dir.into(),
            audio_dir: audio_dir.into(),
            banned_characters,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.incoming_dir,
            &settings.movie_dir,
            &settings.audio_dir,
            settings.banned_characters.clone(),
        )
    }

    /// `"Title (Year)"` with banned characters removed.
    pub fn library_name(&self, found: &TitleYear) -> String {
        strip_banned_characters(&found.canonical_name(), &self.banned_characters)
    }

    /// Renames `name` inside incoming to `"[TAG] name"`.
    fn tag(&self, name: &str, tag: StatusTag) -> PlacementOutcome {
        info!("Renaming {} with {} tag", name, tag);
        match rename_in_place(&self.incoming_dir, name, &tag.apply(name)) {
            Ok(path) => PlacementOutcome::Tagged { tag, path },
            Err(e) => {
                warn!("Could not tag {}: {}", name, e);
                PlacementOutcome::Untouched
            }
        }
    }

    fn place_directory(&self, name: &str, found: &TitleYear) -> PlacementOutcome {
        let canonical = self.library_name(found);

        if name != canonical {
            if path_taken(&self.incoming_dir.join(&canonical)) {
                warn!(
                    "{} already exists in the incoming directory; cannot rename {}",
                    canonical, name
                );
                return self.tag(name, StatusTag::Duplicate);
            }
            info!("Renaming {} to {}", name, canonical);
            if let Err(e) = rename_in_place(&self.incoming_dir, name, &canonical) {
                warn!("{}", e);
                return self.tag(name, StatusTag::Skip);
            }
        }

        let destination = self.movie_dir.join(&canonical);
        if path_taken(&destination) {
            warn!("{} is already in the movie directory", canonical);
            return self.tag(&canonical, StatusTag::Duplicate);
        }

        info!("Moving {} to the movie directory", canonical);
        match move_path(&self.incoming_dir.join(&canonical), &destination) {
            Ok(()) => PlacementOutcome::Moved { destination },
            Err(e) => {
                warn!("{}", e);
                self.tag(&canonical, StatusTag::Duplicate)
            }
        }
    }

    fn place_root_file(&self, name: &str, found: &TitleYear) -> PlacementOutcome {
        let canonical = self.library_name(found);
        let library_folder = self.movie_dir.join(&canonical);
        let source = self.incoming_dir.join(name);

        if library_folder.is_dir() {
            let destination = library_folder.join(name);
            if path_taken(&destination) {
                warn!(
                    "{} is already in {}; leaving the incoming copy alone",
                    name, canonical
                );
                return PlacementOutcome::AlreadyInLibrary {
                    existing: destination,
                };
            }
            info!("Moving {} into existing folder {}", name, canonical);
            return match move_path(&source, &destination) {
                Ok(()) => PlacementOutcome::Moved { destination },
                Err(e) => {
                    warn!("{}", e);
                    self.tag(name, StatusTag::Duplicate)
                }
            };
        }

        let staging = self.incoming_dir.join(&canonical);
        if path_taken(&staging) {
            warn!(
                "{} already exists in the incoming directory; cannot stage {}",
                canonical, name
            );
            return self.tag(name, StatusTag::Duplicate);
        }

        info!("Creating folder {} for {}", canonical, name);
        match self.stage_and_move(&source, name, &staging, &library_folder) {
            Ok(()) => PlacementOutcome::Moved {
                destination: library_folder,
            },
            Err(e) => {
                warn!("{}", e);
                if staging.join(name).exists() {
                    return self.tag(&canonical, StatusTag::Duplicate);
                }
                if staging.exists() {
                    if let Err(e) = remove_empty_directory(&staging) {
                        warn!("{}", e);
                    }
                }
                self.tag(name, StatusTag::Duplicate)
            }
        }
    }

    fn stage_and_move(
        &self,
        source: &Path,
        name: &str,
        staging: &Path,
        library_folder: &Path,
    ) -> Result<(), crate::error::StorageError> {
        create_directory(staging)?;
        move_path(source, &staging.join(name))?;
        move_path(staging, library_folder)
    }

    fn place_audio(&self, name: &str) -> PlacementOutcome {
        let destination = self.audio_dir.join(name);
        if path_taken(&destination) {
            warn!("{} is already in the audio directory", name);
            return self.tag(name, StatusTag::Duplicate);
        }

        info!("Moving {} to the audio directory", name);
        match move_path(&self.incoming_dir.join(name), &destination) {
            Ok(()) => PlacementOutcome::Moved { destination },
            Err(e) => {
                warn!("{}", e);
                self.tag(name, StatusTag::Duplicate)
            }
        }
    }
}

impl Placement for PlacementResolver {
    fn resolve(&self, entry: &Entry, disposition: Disposition) -> PlacementOutcome {
        match disposition {
            Disposition::Unrecognized => self.tag(&entry.name, StatusTag::Skip),
            Disposition::Tv => self.tag(&entry.name, StatusTag::Tv),
            Disposition::Audio => self.place_audio(&entry.name),
            Disposition::Movie(found) => match entry.kind {
                EntryKind::Directory => self.place_directory(&entry.name, &found),
                EntryKind::File => self.place_root_file(&entry.name, &found),
            },
        }
    }
}
