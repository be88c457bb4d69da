//! ConfigLoader facade delegating to the merge service.

use super::merge::service::MergeService;
use super::AgentbookConfig;
use crate::error::Result;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global file and the environment.
    pub fn load() -> Result<AgentbookConfig> {
        Ok(MergeService::load(None)?)
    }

    /// Like [`load`](Self::load), with `path` layered over the global file.
    pub fn load_from_file(path: &Path) -> Result<AgentbookConfig> {
        Ok(MergeService::load(Some(path))?)
    }

    /// Create default configuration.
    pub fn default() -> AgentbookConfig {
        AgentbookConfig::default()
    }
}
