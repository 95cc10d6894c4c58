use crate::classifier::extension::ExtensionClassifier;
use crate::config::Settings;

const BYTES_PER_MB: u64 = 1_000_000;

/// One immediate file of a candidate directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirFile {
    pub name: String,
    /// Bytes
    pub size: u64,
}

impl DirFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Whole megabytes, truncated.
    pub fn size_mb(&self) -> u64 {
        self.size / BYTES_PER_MB
    }
}

/// Verdict for one directory. Recomputed every cycle, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentClassification {
    pub is_video_folder: bool,
    pub is_tv: bool,
    pub is_movie: bool,
}

/// Size-based movie / TV / sample heuristics over a directory listing.
#[derive(Debug, Clone)]
pub struct ContentClassifier {
    extensions: ExtensionClassifier,
    min_movie_size: u64,
    min_episode_size: u64,
}

impl ContentClassifier {
    pub fn new(
        extensions: ExtensionClassifier,
        min_movie_size: u64,
        min_episode_size: u64,
    ) -> Self {
        Self {
            extensions,
            min_movie_size,
            min_episode_size,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            ExtensionClassifier::from_settings(settings),
            settings.min_movie_size,
            settings.min_episode_size,
        )
    }

    pub fn extensions(&self) -> &ExtensionClassifier {
        &self.extensions
    }

    pub fn is_video_folder(&self, files: &[DirFile]) -> bool {
        files.iter().any(|f| self.extensions.is_video(&f.name))
    }

    pub fn is_audio_folder(&self, files: &[DirFile]) -> bool {
        files.iter().any(|f| self.extensions.is_audio(&f.name))
    }

    pub fn is_sample(&self, file: &DirFile) -> bool {
        file.size_mb() < self.min_episode_size
    }

    /// Episode-sized: below the movie threshold but not a sample. A lone
    /// sample clip never turns a movie folder into a TV folder.
    pub fn is_tv_candidate(&self, file: &DirFile) -> bool {
        file.size_mb() < self.min_movie_size && !self.is_sample(file)
    }

    pub fn classify(&self, files: &[DirFile]) -> ContentClassification {
        let is_video_folder = self.is_video_folder(files);
        let is_tv = files
            .iter()
            .filter(|f| self.extensions.is_video(&f.name))
            .any(|f| self.is_tv_candidate(f));

        ContentClassification {
            is_video_folder,
            is_tv: is_video_folder && is_tv,
            is_movie: is_video_folder && !is_tv,
        }
    }
}
