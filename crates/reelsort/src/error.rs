use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReelsortError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Watch error: {0}")]
    Watch(#[from] WatchError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config file not found; a default one was written to '{0}'. Edit it and start again.")]
    Generated(PathBuf),

    #[error("Config file '{0}' already exists")]
    AlreadyExists(PathBuf),

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Schema validation failed: {errors}")]
    SchemaValidation { errors: String },

    #[error("Invalid extension list '{field}': {reason}")]
    InvalidExtension { field: String, reason: String },

    #[error("Directory \"{path}\" for '{field}' is invalid")]
    InvalidDirectory { field: String, path: PathBuf },

    #[error("Failed to resolve lookup API key: {0}")]
    Secret(#[from] crate::secrets::SecretError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to rename '{from}' to '{to}': {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move '{from}' to '{to}': {source}")]
    MoveFile {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete '{path}': {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Destination already exists: {0}")]
    AlreadyExists(PathBuf),
}

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Lookup request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Malformed lookup response: {0}")]
    MalformedResponse(String),
}

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to list '{path}': {source}")]
    ScanFailed {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to install signal handler: {0}")]
    Signal(String),
}

pub type Result<T> = std::result::Result<T, ReelsortError>;
