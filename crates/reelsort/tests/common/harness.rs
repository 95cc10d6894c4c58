//! Test harness for isolated test execution.
//!
//! The `TestHarness` struct owns a temp directory with `incoming`, `movies`
//! and `audio` libraries plus a config file, and runs poll cycles against
//! them with an injected lookup.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use assert_fs::prelude::*;
use assert_fs::TempDir;

use reelsort::config::{load_config, Config, Settings};
use reelsort::{CycleReport, EntryOrchestrator, IncomingScanner, MetadataLookup, Poller, TitleYear};

use super::builders::ConfigBuilder;

pub const MB: u64 = 1_000_000;

/// Answers lookups from a fixed table keyed by the normalized query.
#[derive(Debug, Default, Clone)]
pub struct StaticLookup {
    answers: HashMap<String, TitleYear>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, title: &str, year: &str) -> Self {
        self.answers
            .insert(query.to_string(), TitleYear::new(title, year));
        self
    }
}

impl MetadataLookup for StaticLookup {
    fn lookup(&self, title: &str) -> Option<TitleYear> {
        self.answers.get(title).cloned()
    }
}

/// Test harness providing an isolated incoming directory and libraries.
pub struct TestHarness {
    temp_dir: TempDir,
    pub incoming_dir: PathBuf,
    pub movie_dir: PathBuf,
    pub audio_dir: PathBuf,
    pub config_path: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        for dir in ["incoming", "movies", "audio"] {
            temp_dir
                .child(dir)
                .create_dir_all()
                .expect("Failed to create library dir");
        }

        Self {
            incoming_dir: temp_dir.child("incoming").path().to_path_buf(),
            movie_dir: temp_dir.child("movies").path().to_path_buf(),
            audio_dir: temp_dir.child("audio").path().to_path_buf(),
            config_path: temp_dir.child("config.json").path().to_path_buf(),
            temp_dir,
        }
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Config builder pointed at this harness's directories.
    pub fn config_builder(&self) -> ConfigBuilder {
        ConfigBuilder::new().directories(&self.incoming_dir, &self.movie_dir, &self.audio_dir)
    }

    /// Writes `config` to disk, loads it back and converts it to settings,
    /// the same way the binary does.
    pub fn settings_from(&self, config: &Config) -> Settings {
        let json = serde_json::to_string_pretty(config).expect("Failed to serialize config");
        std::fs::write(&self.config_path, json).expect("Failed to write config file");
        let loaded = load_config(&self.config_path).expect("Failed to load config");
        Settings::from_config(&loaded).expect("Failed to build settings")
    }

    pub fn settings(&self) -> Settings {
        self.settings_from(&self.config_builder().build())
    }

    /// Creates a sparse file of `mb` megabytes under incoming.
    pub fn video(&self, relative: &str, mb: u64) -> PathBuf {
        self.sized_file(relative, mb * MB)
    }

    pub fn sized_file(&self, relative: &str, bytes: u64) -> PathBuf {
        let path = self.incoming_dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        File::create(&path)
            .and_then(|f| f.set_len(bytes))
            .expect("Failed to create sized file");
        path
    }

    pub fn touch(&self, relative: &str) -> PathBuf {
        let child = self.temp_dir.child("incoming").child(relative);
        child.touch().expect("Failed to touch file");
        child.path().to_path_buf()
    }

    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let child = self.temp_dir.child("incoming").child(relative);
        child.create_dir_all().expect("Failed to create dir");
        child.path().to_path_buf()
    }

    /// Creates a file inside the movie library.
    pub fn library_file(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.movie_dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(&path, content).expect("Failed to write library file");
        path
    }

    /// Runs one poll cycle with `settings` and `lookup`.
    pub fn run_cycle<L: MetadataLookup>(&self, settings: &Settings, lookup: L) -> CycleReport {
        let poller = Poller::new(
            IncomingScanner::new(&settings.incoming_dir),
            EntryOrchestrator::from_settings(settings, lookup),
            settings.delay_time,
            Arc::new(AtomicBool::new(false)),
        );
        poller.process_cycle().expect("Cycle failed")
    }

    pub fn incoming_names(&self) -> Vec<String> {
        names_in(&self.incoming_dir)
    }

    pub fn movie_names(&self) -> Vec<String> {
        names_in(&self.movie_dir)
    }

    pub fn audio_names(&self) -> Vec<String> {
        names_in(&self.audio_dir)
    }
}

/// Sorted names of the immediate children of `dir`.
pub fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|e| {
            e.expect("Failed to read entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}
