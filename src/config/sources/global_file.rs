//! Global config file under the platform config directory.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::PathBuf;

/// `<config dir>/agentbook/config.toml`, when the platform has a config dir.
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "agentbook", "agentbook")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the global file to builder; a missing file is not an error.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match global_config_path() {
        Some(path) => Ok(builder.add_source(File::from(path).required(false))),
        None => Ok(builder),
    }
}
