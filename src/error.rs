//! Error types shared across the crate.

use crate::commitment::CommitmentKind;
use thiserror::Error;

/// Errors surfaced by parsing, compiling and collection access.
///
/// Unresolved references are not errors; they are recorded as
/// [`ReferenceResolutionIssue`](crate::resolver::ReferenceResolutionIssue)s.
#[derive(Error, Debug)]
pub enum BookError {
    #[error("Malformed {kind} commitment: {message}\n\nContent:\n{content}\n\nCommitment:\n{block}")]
    MalformedCommitment {
        kind: CommitmentKind,
        message: String,
        content: String,
        block: String,
    },

    #[error("{kind} commitment on line {line} has no content")]
    EmptyCommitment { kind: CommitmentKind, line: usize },

    #[error("Invalid teammate URL '{url}' in TEAM commitment: {line}")]
    InvalidTeammate { url: String, line: String },

    #[error("Agent not found: {agent_name}")]
    NotFound { agent_name: String },

    #[error("Agent already exists: {agent_name}")]
    AlreadyExists { agent_name: String },

    #[error("Tool '{name}' is not available in this environment")]
    ToolUnavailable { name: String },

    #[error("Tool '{name}' failed: {message}")]
    ToolFailed { name: String, message: String },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for BookError {
    fn from(err: config::ConfigError) -> Self {
        BookError::Config(err.to_string())
    }
}

impl From<reqwest::Error> for BookError {
    fn from(err: reqwest::Error) -> Self {
        BookError::Fetch(err.to_string())
    }
}

impl BookError {
    /// True for errors that HTTP-facing callers map to a 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BookError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, BookError>;
