//! Agent reference resolution.
//!
//! Turns FROM, IMPORT and TEAM references into agents (or file bodies),
//! memoizing results in a generation-tagged cache and collecting failures as
//! issues instead of errors.

pub mod cache;
pub mod diagnostics;
pub mod http;
pub mod issues;
pub mod lookup;
pub mod scope;
pub mod service;

pub use cache::{CachedLookup, ResolverCache};
pub use diagnostics::{
    create_unresolved_agent_reference_diagnostics, AgentReferenceDiagnostic, DiagnosticSeverity,
    UnresolvedAgentReferenceDiagnostics,
};
pub use http::HttpBookFetcher;
pub use issues::{IssueLocation, IssueReason, IssueSink, ReferenceResolutionIssue};
pub use lookup::{AgentReferenceLookup, CollectionReferenceLookup};
pub use scope::ResolutionScope;
pub use service::{AgentReferenceResolver, DEFAULT_RESOLUTION_TIMEOUT};
