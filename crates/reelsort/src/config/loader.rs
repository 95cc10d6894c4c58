use std::path::{Path, PathBuf};

use log::info;

use crate::config::schema::{Config, CONFIG_VERSION};
use crate::config::settings::parse_extension_list;
use crate::error::ConfigError;

const SCHEMA_JSON: &str = include_str!("../../schema/config-v1.json");

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let json_value: serde_json::Value = serde_json::from_str(content)?;

    validate_schema(&json_value)?;

    let config: Config = serde_json::from_value(json_value)?;

    validate_config(&config)?;

    Ok(config)
}

/// Loads the config at `path`. When the file does not exist a default one is
/// written there and [`ConfigError::Generated`] is returned so the caller can
/// stop and let the user fill it in.
pub fn load_or_generate<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        let written = write_default_config(path, false)?;
        return Err(ConfigError::Generated(written));
    }
    load_config(path)
}

/// Writes `Config::default()` as pretty JSON. Refuses to replace an existing
/// file unless `force` is set.
pub fn write_default_config<P: AsRef<Path>>(path: P, force: bool) -> Result<PathBuf, ConfigError> {
    let path = path.as_ref();
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    let json = serde_json::to_string_pretty(&Config::default())?;
    std::fs::write(path, json).map_err(|e| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("Wrote default configuration to {}", path.display());
    Ok(path.to_path_buf())
}

fn validate_schema(json_value: &serde_json::Value) -> Result<(), ConfigError> {
    let schema: serde_json::Value =
        serde_json::from_str(SCHEMA_JSON).map_err(|e| ConfigError::Validation {
            message: format!("Invalid embedded schema JSON: {}", e),
        })?;

    let validator = jsonschema::validator_for(&schema).map_err(|e| ConfigError::Validation {
        message: format!("Failed to compile JSON schema: {}", e),
    })?;

    let error_messages: Vec<String> = validator
        .iter_errors(json_value)
        .map(|e| e.to_string())
        .collect();
    if !error_messages.is_empty() {
        return Err(ConfigError::SchemaValidation {
            errors: error_messages.join("; "),
        });
    }

    Ok(())
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.version != CONFIG_VERSION {
        return Err(ConfigError::Validation {
            message: format!("Unsupported config version: {}", config.version),
        });
    }

    if config.delay_time == 0 {
        return Err(ConfigError::Validation {
            message: "delay_time must be greater than 0".to_string(),
        });
    }

    parse_extension_list("extensions_to_delete", &config.files.extensions_to_delete)?;
    parse_extension_list("video_formats", &config.files.video_formats)?;
    parse_extension_list("audio_formats", &config.files.audio_formats)?;

    if config.lookup.enabled && config.lookup.base_url.trim().is_empty() {
        return Err(ConfigError::Validation {
            message: "lookup.base_url must not be empty when lookup is enabled".to_string(),
        });
    }

    Ok(())
}
