use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use secrecy::SecretString;

use crate::config::schema::Config;
use crate::error::ConfigError;
use crate::sanitize::BANNED_CHARACTERS;
use crate::secrets::resolve_secret_optional;

/// File names that are never treated as incoming content.
pub const FILENAMES_TO_IGNORE: [&str; 2] = ["Thumbs.db", ".DS_Store"];

/// Immutable runtime settings, built once from a validated [`Config`] and
/// passed by reference into every component.
#[derive(Debug)]
pub struct Settings {
    pub app_name: String,
    pub incoming_dir: PathBuf,
    pub movie_dir: PathBuf,
    pub audio_dir: PathBuf,
    pub delay_time: Duration,
    pub debug: bool,
    /// MB
    pub min_movie_size: u64,
    /// MB
    pub min_episode_size: u64,
    pub extensions_to_delete: HashSet<String>,
    pub video_formats: HashSet<String>,
    pub audio_formats: HashSet<String>,
    pub banned_characters: Vec<char>,
    pub filenames_to_ignore: Vec<String>,
    pub organize_audio: bool,
    pub lookup: LookupSettings,
}

#[derive(Debug)]
pub struct LookupSettings {
    pub enabled: bool,
    pub base_url: String,
    pub api_key: Option<SecretString>,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl Settings {
    /// Converts a config into settings. Fails when any of the three
    /// directories is missing or not a directory.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let incoming_dir = PathBuf::from(&config.directories.incoming);
        let movie_dir = PathBuf::from(&config.directories.movies);
        let audio_dir = PathBuf::from(&config.directories.audio);

        for (field, dir) in [
            ("incoming", &incoming_dir),
            ("movies", &movie_dir),
            ("audio", &audio_dir),
        ] {
            ensure_directory(field, dir)?;
        }

        let lookup = &config.lookup;
        let api_key = resolve_secret_optional(
            lookup.api_key.as_deref(),
            lookup.api_key_file.as_deref(),
            lookup.api_key_env.as_deref(),
        )?;

        Ok(Self {
            app_name: config.application_name.clone(),
            incoming_dir,
            movie_dir,
            audio_dir,
            delay_time: Duration::from_secs(config.delay_time),
            debug: config.debug,
            min_movie_size: config.files.minimum_movie_size,
            min_episode_size: config.files.minimum_episode_size,
            extensions_to_delete: parse_extension_list(
                "extensions_to_delete",
                &config.files.extensions_to_delete,
            )?,
            video_formats: parse_extension_list("video_formats", &config.files.video_formats)?,
            audio_formats: parse_extension_list("audio_formats", &config.files.audio_formats)?,
            banned_characters: BANNED_CHARACTERS.to_vec(),
            filenames_to_ignore: FILENAMES_TO_IGNORE.iter().map(|s| s.to_string()).collect(),
            organize_audio: config.organize_audio,
            lookup: LookupSettings {
                enabled: lookup.enabled,
                base_url: lookup.base_url.clone(),
                api_key,
                connect_timeout: Duration::from_secs(lookup.connect_timeout_secs),
                timeout: Duration::from_secs(lookup.timeout_secs),
            },
        })
    }
}

fn ensure_directory(field: &str, dir: &Path) -> Result<(), ConfigError> {
    if dir.is_dir() {
        Ok(())
    } else {
        Err(ConfigError::InvalidDirectory {
            field: field.to_string(),
            path: dir.to_path_buf(),
        })
    }
}

/// Parses a comma-separated extension list such as `".avi, .mkv, .mp4"`.
/// Items are trimmed, empty items are dropped, and every item must start
/// with a dot.
pub fn parse_extension_list(field: &str, value: &str) -> Result<HashSet<String>, ConfigError> {
    let mut extensions = HashSet::new();
    for item in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !item.starts_with('.') || item.len() < 2 {
            return Err(ConfigError::InvalidExtension {
                field: field.to_string(),
                reason: format!("'{}' must look like '.ext'", item),
            });
        }
        extensions.insert(item.to_string());
    }
    Ok(extensions)
}

/// Settings rooted in `root/{incoming,movies,audio}` with default thresholds
/// and lookup disabled. The directories are created.
#[cfg(test)]
pub(crate) fn test_settings(root: &Path) -> Settings {
    let mut config = Config::default();
    config.directories.incoming = root.join("incoming").to_string_lossy().into_owned();
    config.directories.movies = root.join("movies").to_string_lossy().into_owned();
    config.directories.audio = root.join("audio").to_string_lossy().into_owned();
    config.lookup.enabled = false;
    config.lookup.api_key_env = None;
    for dir in ["incoming", "movies", "audio"] {
        std::fs::create_dir_all(root.join(dir)).unwrap();
    }
    Settings::from_config(&config).unwrap()
}
