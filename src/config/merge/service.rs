//! MergeService: orchestrates sources and deserializes to AgentbookConfig.

use crate::config::sources::{environment, global_file};
use crate::config::AgentbookConfig;
use config::{ConfigError, File};
use std::path::Path;

use super::policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: defaults (lowest) -> global file -> `file` -> environment (highest).
    pub fn load(file: Option<&Path>) -> Result<AgentbookConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = match file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
