//! Configuration.
//!
//! Layers, lowest precedence first: built-in defaults, the global file
//! (`<config dir>/agentbook/config.toml`), an explicit file, then
//! `AGENTBOOK__SECTION__KEY` environment variables.

pub mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::commitment::Strictness;
use crate::logging::LoggingConfig;
use crate::resolver::DEFAULT_RESOLUTION_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentbookConfig {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub parsing: ParsingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reference resolution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Upper bound for one lookup or fetch.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Implicit base agent every agent without FROM inherits from.
    #[serde(default)]
    pub adam_agent_url: Option<String>,

    /// URLs under this prefix are served by the local collection.
    #[serde(default)]
    pub local_server_url: Option<String>,

    /// Base directory for relative IMPORT file paths.
    #[serde(default)]
    pub file_base_dir: Option<PathBuf>,

    /// Fetch agents and files from remote servers over HTTP.
    #[serde(default = "default_true")]
    pub remote_fetch: bool,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_RESOLUTION_TIMEOUT.as_millis() as u64
}

fn default_true() -> bool {
    true
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            adam_agent_url: None,
            local_server_url: None,
            file_base_dir: None,
            remote_fetch: default_true(),
        }
    }
}

impl ResolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsingConfig {
    /// Fail on malformed teammates and empty commitments instead of skipping them.
    #[serde(default)]
    pub strict: bool,
}

impl ParsingConfig {
    pub fn strictness(&self) -> Strictness {
        Strictness::from_strict_flag(self.strict)
    }
}
