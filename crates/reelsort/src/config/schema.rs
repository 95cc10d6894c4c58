use serde::{Deserialize, Serialize};

pub const CONFIG_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    #[serde(default = "default_application_name")]
    pub application_name: String,
    /// Seconds between scans of the incoming directory.
    #[serde(default = "default_delay_time")]
    pub delay_time: u64,
    #[serde(default)]
    pub debug: bool,
    pub directories: DirectoriesConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub organize_audio: bool,
}

fn default_application_name() -> String {
    "reelsort".to_string()
}

fn default_delay_time() -> u64 {
    180
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            application_name: default_application_name(),
            delay_time: default_delay_time(),
            debug: false,
            directories: DirectoriesConfig::default(),
            files: FilesConfig::default(),
            lookup: LookupConfig::default(),
            organize_audio: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoriesConfig {
    pub incoming: String,
    pub movies: String,
    pub audio: String,
}

impl Default for DirectoriesConfig {
    fn default() -> Self {
        Self {
            incoming: "/srv/incoming".to_string(),
            movies: "/srv/movies".to_string(),
            audio: "/srv/audio".to_string(),
        }
    }
}

/// File classification settings. All sizes are in MB (1,000,000 bytes).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "default_min_movie_size")]
    pub minimum_movie_size: u64,
    #[serde(default = "default_min_episode_size")]
    pub minimum_episode_size: u64,
    /// Comma-separated, e.g. `".nfo, .txt, .jpg"`.
    #[serde(default = "default_extensions_to_delete")]
    pub extensions_to_delete: String,
    #[serde(default = "default_video_formats")]
    pub video_formats: String,
    #[serde(default = "default_audio_formats")]
    pub audio_formats: String,
}

fn default_min_movie_size() -> u64 {
    650
}

fn default_min_episode_size() -> u64 {
    25
}

fn default_extensions_to_delete() -> String {
    ".nfo, .txt, .jpg".to_string()
}

fn default_video_formats() -> String {
    ".avi, .mkv, .mp4".to_string()
}

fn default_audio_formats() -> String {
    ".mp3, .ogg, .flac, .aac, .wav, .m4a, .alac, .aiff".to_string()
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            minimum_movie_size: default_min_movie_size(),
            minimum_episode_size: default_min_episode_size(),
            extensions_to_delete: default_extensions_to_delete(),
            video_formats: default_video_formats(),
            audio_formats: default_audio_formats(),
        }
    }
}

/// Online title lookup (OMDb) used when a name carries no year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_key_file: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: Option<String>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "http://www.omdbapi.com/".to_string()
}

fn default_api_key_env() -> Option<String> {
    Some("OMDB_API_KEY".to_string())
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_timeout() -> u64 {
    30
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_base_url(),
            api_key: None,
            api_key_file: None,
            api_key_env: default_api_key_env(),
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_timeout(),
        }
    }
}
