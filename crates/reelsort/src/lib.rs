pub mod classifier;
pub mod config;
pub mod entry;
pub mod error;
pub mod lookup;
pub mod probe;
pub mod sanitize;
pub mod secrets;
pub mod status;
pub mod storage;
pub mod title;
pub mod watcher;

pub use classifier::{ContentClassification, ContentClassifier, DirFile, ExtensionClassifier};
pub use config::{load_config, load_or_generate, Config, Settings};
pub use entry::{Entry, EntryKind};
pub use error::{ConfigError, LookupError, ReelsortError, Result, StorageError, WatchError};
pub use lookup::{MetadataLookup, NoLookup, OmdbClient};
pub use secrets::{resolve_secret, resolve_secret_optional, SecretError};
pub use status::StatusTag;
pub use storage::{Disposition, Placement, PlacementOutcome, PlacementResolver};
pub use title::{TitleExtractor, TitleYear};
pub use watcher::{CycleReport, EntryOrchestrator, EntryOutcome, IncomingScanner, Poller};
