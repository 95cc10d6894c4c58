pub mod loader;
pub mod schema;
pub mod settings;

pub use loader::{load_config, load_config_from_str, load_or_generate, write_default_config};
pub use schema::{Config, DirectoriesConfig, FilesConfig, LookupConfig, CONFIG_VERSION};
pub use settings::{parse_extension_list, LookupSettings, Settings, FILENAMES_TO_IGNORE};

#[cfg(test)]
pub(crate) use settings::test_settings;
