//! Builder patterns for creating test configurations programmatically.

#![allow(dead_code)]

use std::path::Path;

use reelsort::config::schema::{Config, DirectoriesConfig, FilesConfig, LookupConfig};

/// Builder for creating `Config` instances.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Defaults for testing: lookup disabled and no API key source.
    pub fn new() -> Self {
        let mut config = Config::default();
        config.lookup = LookupConfig {
            enabled: false,
            api_key_env: None,
            ..LookupConfig::default()
        };
        Self { config }
    }

    pub fn directories(mut self, incoming: &Path, movies: &Path, audio: &Path) -> Self {
        self.config.directories = DirectoriesConfig {
            incoming: incoming.to_string_lossy().into_owned(),
            movies: movies.to_string_lossy().into_owned(),
            audio: audio.to_string_lossy().into_owned(),
        };
        self
    }

    pub fn delay_time(mut self, seconds: u64) -> Self {
        self.config.delay_time = seconds;
        self
    }

    /// Thresholds in MB.
    pub fn sizes(mut self, minimum_movie_size: u64, minimum_episode_size: u64) -> Self {
        self.config.files.minimum_movie_size = minimum_movie_size;
        self.config.files.minimum_episode_size = minimum_episode_size;
        self
    }

    pub fn extensions_to_delete(mut self, list: &str) -> Self {
        self.config.files.extensions_to_delete = list.to_string();
        self
    }

    pub fn video_formats(mut self, list: &str) -> Self {
        self.config.files.video_formats = list.to_string();
        self
    }

    pub fn files(mut self, files: FilesConfig) -> Self {
        self.config.files = files;
        self
    }

    pub fn organize_audio(mut self, enabled: bool) -> Self {
        self.config.organize_audio = enabled;
        self
    }

    pub fn lookup(mut self, lookup: LookupConfig) -> Self {
        self.config.lookup = lookup;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
