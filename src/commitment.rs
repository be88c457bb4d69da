//! Commitments: the directives of the Book language.
//!
//! Each [`CommitmentKind`] has exactly one [`CommitmentDefinition`] that knows
//! how to fold a block's content into [`AgentModelRequirements`]. Definitions
//! are plain functions without I/O; anything that needs another agent is left
//! as a reference for the resolver.
//!
//! [`AgentModelRequirements`]: crate::requirements::AgentModelRequirements

pub mod definition;
pub mod import;
pub mod kind;
pub mod meta;
pub mod registry;
pub mod settings;
pub mod team;
pub mod text;
pub mod tool_use;

pub use definition::{ApplyContext, CommitmentDefinition};
pub use kind::CommitmentKind;
pub use registry::{CommitmentRegistry, CommitmentRegistryBuilder, KeywordMatch};
pub use team::parse_team_teammates;

use serde::{Deserialize, Serialize};

/// How malformed entries are treated.
///
/// Strict parsing fails on the first malformed TEAM entry or empty commitment;
/// lenient parsing skips it and continues. Editor feedback always runs lenient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Strict,
    #[default]
    Lenient,
}

impl Strictness {
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict {
            Strictness::Strict
        } else {
            Strictness::Lenient
        }
    }

    pub fn is_strict(self) -> bool {
        self == Strictness::Strict
    }
}
