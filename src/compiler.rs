//! Model requirements compiler.
//!
//! `compile_agent` runs the whole pipeline: compose inheritance, expand
//! imports, fold commitments in document order, then resolve teammates. The
//! fold itself is pure; everything that touches other agents goes through the
//! optional [`AgentReferenceResolver`].

use crate::book::{parse_book, ParsedBook};
use crate::commitment::{ApplyContext, CommitmentRegistry, Strictness};
use crate::composer::{
    expand_imports, parent_reference, resolve_inherited_agent_source, InheritanceContext,
};
use crate::config::AgentbookConfig;
use crate::error::{BookError, Result};
use crate::identity::agent_name_from_title;
use crate::requirements::{AgentModelRequirements, SystemMessageSection};
use crate::resolver::cache::reference_key;
use crate::resolver::{AgentReferenceResolver, ReferenceResolutionIssue, ResolutionScope};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use crate::hash::compute_agent_hash;

/// Options for [`compile_agent`].
#[derive(Clone, Default)]
pub struct CompileOptions {
    pub resolver: Option<Arc<AgentReferenceResolver>>,
    pub strictness: Strictness,
    /// Implicit base agent for agents without FROM.
    pub adam_agent_url: Option<String>,
    /// Name or URL the compiled agent is known under; seeds cycle detection.
    pub agent_reference: Option<String>,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AgentbookConfig) -> Self {
        Self {
            resolver: None,
            strictness: config.parsing.strictness(),
            adam_agent_url: config.resolver.adam_agent_url.clone(),
            agent_reference: None,
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<AgentReferenceResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn with_adam_agent_url(mut self, url: impl Into<String>) -> Self {
        self.adam_agent_url = Some(url.into());
        self
    }

    pub fn with_agent_reference(mut self, reference: impl Into<String>) -> Self {
        self.agent_reference = Some(reference.into());
        self
    }
}

/// Compiled requirements plus every reference that could not be resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledAgent {
    pub requirements: AgentModelRequirements,
    pub issues: Vec<ReferenceResolutionIssue>,
}

/// Fold parsed commitments into requirements, in document order.
///
/// The preamble becomes the leading section. Empty blocks of kinds that need
/// content fail in strict mode and are skipped otherwise.
pub fn fold_commitments(
    parsed: &ParsedBook,
    registry: &CommitmentRegistry,
    strictness: Strictness,
) -> Result<AgentModelRequirements> {
    let context = ApplyContext { strictness };
    let mut requirements = AgentModelRequirements {
        agent_title: parsed.title.clone(),
        ..AgentModelRequirements::default()
    };
    if !parsed.preamble.is_empty() {
        requirements = requirements.push_section(SystemMessageSection::preamble(&parsed.preamble));
    }

    for block in &parsed.blocks {
        let Some(definition) = registry.lookup(block.kind) else {
            debug!(kind = %block.kind, "No definition registered, skipping block");
            continue;
        };
        if definition.requires_content && block.is_empty() {
            if strictness.is_strict() {
                return Err(BookError::EmptyCommitment {
                    kind: block.kind,
                    line: block.span.start_line,
                });
            }
            warn!(
                kind = %block.kind,
                line = block.span.start_line,
                "Skipping commitment without content"
            );
            continue;
        }
        requirements = definition.apply_to_agent_model_requirements(requirements, block, context)?;
    }

    Ok(requirements.finalize())
}

/// Compile an agent source.
pub async fn compile_agent(source: &str, options: &CompileOptions) -> Result<CompiledAgent> {
    let registry = CommitmentRegistry::standard();
    let adam_agent_url = options.adam_agent_url.as_deref();

    let Some(resolver) = options.resolver.as_deref() else {
        let declared = resolve_inherited_agent_source(
            source,
            InheritanceContext::Static { adam_agent_url },
        )
        .await?;
        let requirements = fold_commitments(&parse_book(&declared), registry, options.strictness)?;
        return Ok(CompiledAgent {
            requirements,
            issues: Vec::new(),
        });
    };

    let original = parse_book(source);
    let scope = root_scope(&original, options);

    let inherited = resolve_inherited_agent_source(
        source,
        InheritanceContext::Resolving {
            adam_agent_url,
            resolver,
            scope: &scope,
        },
    )
    .await?;
    let effective = expand_imports(&inherited, resolver, &scope).await?;

    let mut requirements = fold_commitments(&parse_book(&effective), registry, options.strictness)?;
    requirements.parent_agent_url = parent_reference(&original, adam_agent_url)
        .reference()
        .map(str::to_string);
    requirements.capabilities = resolver
        .list_team_capabilities(std::mem::take(&mut requirements.capabilities), &scope)
        .await;

    let issues = scope.issues().snapshot();
    info!(
        agent = original.title.as_deref().unwrap_or_default(),
        sections = requirements.sections.len(),
        issues = issues.len(),
        "Compiled agent"
    );
    Ok(CompiledAgent {
        requirements,
        issues,
    })
}

/// Requirements only; issues are dropped.
pub async fn create_agent_model_requirements(
    source: &str,
    options: &CompileOptions,
) -> Result<AgentModelRequirements> {
    Ok(compile_agent(source, options).await?.requirements)
}

fn root_scope(parsed: &ParsedBook, options: &CompileOptions) -> ResolutionScope {
    let mut keys = Vec::new();
    if let Some(title) = &parsed.title {
        keys.push(format!("name:{}", agent_name_from_title(title)));
    }
    if let Some(reference) = &options.agent_reference {
        keys.push(reference_key(reference));
    }
    ResolutionScope::seeded(keys)
}
