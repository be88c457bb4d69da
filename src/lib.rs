//! Agentbook: the Book agent definition language.
//!
//! A Book source is a title line followed by line-oriented commitments
//! (`PERSONA`, `RULE`, `TEAM`, `IMPORT`, ...). This crate parses sources,
//! resolves references between agents, composes inheritance and imports, and
//! compiles everything into [`AgentModelRequirements`].

pub mod book;
pub mod collection;
pub mod commitment;
pub mod compiler;
pub mod composer;
pub mod config;
pub mod error;
pub mod hash;
pub mod identity;
pub mod links;
pub mod logging;
pub mod profile;
pub mod requirements;
pub mod resolver;

pub use book::{parse_book, CommitmentBlock, ParsedBook};
pub use commitment::{CommitmentKind, CommitmentRegistry, Strictness};
pub use compiler::{
    compile_agent, create_agent_model_requirements, fold_commitments, CompileOptions,
    CompiledAgent,
};
pub use composer::{expand_imports, resolve_inherited_agent_source, InheritanceContext};
pub use config::{AgentbookConfig, ConfigLoader};
pub use error::{BookError, Result};
pub use hash::compute_agent_hash;
pub use identity::{AgentIdentity, ResolvedAgent};
pub use requirements::{AgentCapability, AgentModelRequirements};
pub use resolver::{
    create_unresolved_agent_reference_diagnostics, AgentReferenceResolver, ResolutionScope,
};
