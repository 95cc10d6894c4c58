use std::collections::HashSet;

use crate::config::Settings;

/// Returns the last `.`-delimited suffix of `name`, dot included.
///
/// A name without a dot, or whose only dot is the leading one (`.DS_Store`),
/// has no extension.
pub fn extension_of(name: &str) -> Option<&str> {
    match name.rfind('.') {
        Some(pos) if pos > 0 => Some(&name[pos..]),
        _ => None,
    }
}

/// Case-sensitive extension lookups against the configured sets.
#[derive(Debug, Clone)]
pub struct ExtensionClassifier {
    video: HashSet<String>,
    junk: HashSet<String>,
    audio: HashSet<String>,
}

impl ExtensionClassifier {
    pub fn new(video: HashSet<String>, junk: HashSet<String>, audio: HashSet<String>) -> Self {
        Self { video, junk, audio }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.video_formats.clone(),
            settings.extensions_to_delete.clone(),
            settings.audio_formats.clone(),
        )
    }

    pub fn is_video(&self, name: &str) -> bool {
        Self::in_set(&self.video, name)
    }

    pub fn is_deletable_junk(&self, name: &str) -> bool {
        Self::in_set(&self.junk, name)
    }

    pub fn is_audio(&self, name: &str) -> bool {
        Self::in_set(&self.audio, name)
    }

    /// The video extension of `name`, if it has one.
    pub fn video_extension<'a>(&self, name: &'a str) -> Option<&'a str> {
        extension_of(name).filter(|ext| self.video.contains(*ext))
    }

    fn in_set(set: &HashSet<String>, name: &str) -> bool {
        extension_of(name).is_some_and(|ext| set.contains(ext))
    }
}
