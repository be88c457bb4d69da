//! Logging System
//!
//! Structured logging using the `tracing` crate. Level, format and destination
//! come from `LoggingConfig`, overridden by `AGENTBOOK_LOG*` environment
//! variables.

use crate::error::{BookError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

pub const LOG_ENV: &str = "AGENTBOOK_LOG";
pub const LOG_MODULES_ENV: &str = "AGENTBOOK_LOG_MODULES";
pub const LOG_FORMAT_ENV: &str = "AGENTBOOK_LOG_FORMAT";
pub const LOG_OUTPUT_ENV: &str = "AGENTBOOK_LOG_OUTPUT";
pub const LOG_FILE_ENV: &str = "AGENTBOOK_LOG_FILE";

/// Resolve the log file path with precedence: AGENTBOOK_LOG_FILE env, config file, default.
///
/// The default lives in the platform state directory (data-local directory
/// where the platform has no state directory).
pub fn resolve_log_file_path(config_file: Option<PathBuf>) -> Result<PathBuf> {
    if let Ok(env_path) = std::env::var(LOG_FILE_ENV) {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    if let Some(p) = config_file {
        if !p.as_os_str().is_empty() {
            return Ok(p);
        }
    }
    default_log_file_path()
}

fn default_log_file_path() -> Result<PathBuf> {
    let project_dirs = directories::ProjectDirs::from("", "agentbook", "agentbook").ok_or_else(|| {
        BookError::Config("Could not determine platform state directory for log file".to_string())
    })?;
    let dir = project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_local_dir())
        .to_path_buf();
    Ok(dir.join("agentbook.log"))
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `false` installs a subscriber that drops everything.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Base directive for the filter (`trace` through `error`, or `off`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `text` or `json`.
    #[serde(default = "default_format")]
    pub format: String,

    /// `stderr`, `stdout`, `file`, `file+stderr` or `both` (stdout and stderr).
    #[serde(default = "default_output")]
    pub output: String,

    /// Used when the output includes `file`; see [`resolve_log_file_path`].
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// ANSI colors for text output; never applied to files.
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels, e.g. `agentbook::resolver = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Json,
    Text,
}

/// Initialize the global subscriber.
///
/// Priority order (highest to lowest):
/// 1. Environment variables (AGENTBOOK_LOG, AGENTBOOK_LOG_FORMAT, ...)
/// 2. `config`
/// 3. Defaults
///
/// Fails when a subscriber is already installed.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<()> {
    let disabled = config.map(|c| !c.enabled).unwrap_or(false);
    if disabled {
        return Registry::default()
            .with(EnvFilter::new("off"))
            .try_init()
            .map_err(|e| BookError::Config(format!("Failed to install subscriber: {}", e)));
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = determine_output(config)?;
    let use_color = config.map(|c| c.color).unwrap_or(true) && !output.file;
    let writer = make_writer(&output, config)?;

    let layer = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(writer)
            .boxed(),
        LogFormat::Text => fmt::layer()
            .with_target(true)
            .with_timer(ChronoUtc::rfc_3339())
            .with_ansi(use_color)
            .with_writer(writer)
            .boxed(),
    };

    Registry::default()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| BookError::Config(format!("Failed to install subscriber: {}", e)))
}

fn make_writer(output: &OutputDestinations, config: Option<&LoggingConfig>) -> Result<BoxMakeWriter> {
    let writer = if output.file {
        let file = open_log_file(config.and_then(|c| c.file.clone()))?;
        if output.stderr {
            BoxMakeWriter::new(file.and(std::io::stderr))
        } else {
            BoxMakeWriter::new(file)
        }
    } else if output.stdout && output.stderr {
        BoxMakeWriter::new(std::io::stdout.and(std::io::stderr))
    } else if output.stdout {
        BoxMakeWriter::new(std::io::stdout)
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };
    Ok(writer)
}

fn open_log_file(config_file: Option<PathBuf>) -> Result<std::fs::File> {
    let log_file = resolve_log_file_path(config_file)?;
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| BookError::Config(format!("Failed to create log directory: {}", e)))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| BookError::Config(format!("Failed to open log file {:?}: {}", log_file, e)))
}

/// `AGENTBOOK_LOG` replaces the whole filter; otherwise the configured level
/// plus module directives from config and `AGENTBOOK_LOG_MODULES`.
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut directives: Vec<String> = config
        .map(|c| {
            c.modules
                .iter()
                .map(|(module, module_level)| format!("{}={}", module, module_level))
                .collect()
        })
        .unwrap_or_default();
    if let Ok(modules) = std::env::var(LOG_MODULES_ENV) {
        directives.extend(
            modules
                .split(',')
                .filter_map(|entry| entry.split_once('='))
                .map(|(module, module_level)| format!("{}={}", module.trim(), module_level.trim())),
        );
    }

    let mut filter = EnvFilter::new(level);
    for directive in directives {
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| BookError::Config(format!("Invalid log directive '{}': {}", directive, e)))?,
        );
    }
    Ok(filter)
}

fn determine_format(config: Option<&LoggingConfig>) -> Result<LogFormat> {
    if let Ok(format) = std::env::var(LOG_FORMAT_ENV) {
        if let Ok(parsed) = parse_format(&format) {
            return Ok(parsed);
        }
    }
    parse_format(config.map(|c| c.format.as_str()).unwrap_or("text"))
}

fn parse_format(format: &str) -> Result<LogFormat> {
    match format {
        "json" => Ok(LogFormat::Json),
        "text" => Ok(LogFormat::Text),
        other => Err(BookError::Config(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

/// Output destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OutputDestinations {
    stdout: bool,
    stderr: bool,
    file: bool,
}

fn determine_output(config: Option<&LoggingConfig>) -> Result<OutputDestinations> {
    if let Ok(output) = std::env::var(LOG_OUTPUT_ENV) {
        return parse_output_destinations(&output);
    }
    parse_output_destinations(config.map(|c| c.output.as_str()).unwrap_or("stderr"))
}

fn parse_output_destinations(output: &str) -> Result<OutputDestinations> {
    let (stdout, stderr, file) = match output {
        "stdout" => (true, false, false),
        "stderr" => (false, true, false),
        "file" => (false, false, true),
        "file+stderr" => (false, true, true),
        "both" => (true, true, false),
        _ => {
            return Err(BookError::Config(format!(
                "Invalid log output: {} (must be 'stdout', 'stderr', 'file', 'file+stderr', or 'both')",
                output
            )))
        }
    };
    Ok(OutputDestinations {
        stdout,
        stderr,
        file,
    })
}
