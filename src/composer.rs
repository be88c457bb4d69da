//! Agent source composition: inheritance and IMPORT expansion.
//!
//! Both steps produce Book text again, so the compiler folds one effective
//! source regardless of where its commitments came from.

use crate::book::{parse_book, CommitmentBlock, ParsedBook};
use crate::commitment::settings::is_void_parent;
use crate::commitment::{CommitmentKind, CommitmentRegistry};
use crate::error::Result;
use crate::identity::{agent_name_from_title, normalize_agent_name};
use crate::links::{self, ImportTarget};
use crate::resolver::cache::agent_keys;
use crate::resolver::{AgentReferenceResolver, IssueLocation, ResolutionScope};
use futures::future::{join_all, BoxFuture, FutureExt};
use tracing::debug;

/// How inheritance is applied.
#[derive(Clone, Copy)]
pub enum InheritanceContext<'a> {
    /// No I/O: only declares the implicit base agent with a FROM line.
    Static { adam_agent_url: Option<&'a str> },
    /// Resolves the parent chain and inlines inherited commitments.
    Resolving {
        adam_agent_url: Option<&'a str>,
        resolver: &'a AgentReferenceResolver,
        scope: &'a ResolutionScope,
    },
}

/// Parent an agent inherits from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentReference {
    /// Written in a FROM commitment on `line`.
    Declared { reference: String, line: usize },
    /// The implicit base agent.
    Implicit(String),
    None,
}

impl ParentReference {
    pub fn reference(&self) -> Option<&str> {
        match self {
            ParentReference::Declared { reference, .. } => Some(reference),
            ParentReference::Implicit(url) => Some(url),
            ParentReference::None => None,
        }
    }
}

/// The last FROM wins; `FROM VOID` turns inheritance off.
pub fn parent_reference(parsed: &ParsedBook, adam_agent_url: Option<&str>) -> ParentReference {
    match parsed.last_block_of(CommitmentKind::From) {
        Some(block) if is_void_parent(&block.content) => ParentReference::None,
        Some(block) if !block.content.trim().is_empty() => ParentReference::Declared {
            reference: block.content.trim().to_string(),
            line: block.span.start_line,
        },
        _ => match adam_agent_url {
            Some(url) if !is_base_agent(parsed, url) => ParentReference::Implicit(url.to_string()),
            _ => ParentReference::None,
        },
    }
}

fn is_base_agent(parsed: &ParsedBook, adam_agent_url: &str) -> bool {
    let Some(title) = &parsed.title else {
        return false;
    };
    links::agent_slug_from_url(adam_agent_url)
        .map(|slug| normalize_agent_name(&slug) == agent_name_from_title(title))
        .unwrap_or(false)
}

/// Apply inheritance to `source`.
///
/// With a resolver the result is: local title, local preamble, the parent's
/// commitments (recursively composed), then the local commitments. FROM
/// commitments are dropped from the output. When the parent cannot be resolved
/// the source is returned unchanged and the failure is recorded in the scope.
pub async fn resolve_inherited_agent_source(
    source: &str,
    context: InheritanceContext<'_>,
) -> Result<String> {
    match context {
        InheritanceContext::Static { adam_agent_url } => {
            Ok(declare_base_agent(source, adam_agent_url))
        }
        InheritanceContext::Resolving {
            adam_agent_url,
            resolver,
            scope,
        } => compose(source, adam_agent_url, resolver, scope).await,
    }
}

fn declare_base_agent(source: &str, adam_agent_url: Option<&str>) -> String {
    let parsed = parse_book(source);
    let Some(adam) = adam_agent_url else {
        return source.to_string();
    };
    if parsed.title.is_none()
        || parsed.last_block_of(CommitmentKind::From).is_some()
        || is_base_agent(&parsed, adam)
    {
        return source.to_string();
    }

    let lines: Vec<&str> = source.lines().collect();
    let insert_at = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .map(|index| index + 1)
        .unwrap_or(0);

    let from_line = format!("FROM {}", adam);
    let mut output: Vec<&str> = Vec::with_capacity(lines.len() + 1);
    output.extend(&lines[..insert_at]);
    output.push(&from_line);
    output.extend(&lines[insert_at..]);
    output.join("\n")
}

fn compose<'a>(
    source: &'a str,
    adam_agent_url: Option<&'a str>,
    resolver: &'a AgentReferenceResolver,
    scope: &'a ResolutionScope,
) -> BoxFuture<'a, Result<String>> {
    async move {
        let parsed = parse_book(source);
        // blank sources have no title line to compose under
        let Some(title) = parsed.title.as_deref() else {
            return Ok(source.to_string());
        };
        let parent = parent_reference(&parsed, adam_agent_url);
        let resolved = match &parent {
            ParentReference::None => return Ok(source.to_string()),
            ParentReference::Declared { reference, line } => {
                let scope = scope.at(IssueLocation {
                    kind: CommitmentKind::From,
                    line: *line,
                });
                resolver.resolve(reference, &scope).await
            }
            ParentReference::Implicit(url) => resolver.resolve_quietly(url, scope).await,
        };
        let (Some(agent), Some(reference)) = (resolved, parent.reference()) else {
            return Ok(source.to_string());
        };
        let Some(child) = scope.enter_all(agent_keys(reference, &agent)) else {
            return Ok(source.to_string());
        };

        let parent_source = compose(&agent.source, adam_agent_url, resolver, &child).await?;
        let inherited = parse_book(&parent_source);
        debug!(
            parent = %agent.identity.agent_name,
            inherited = inherited.blocks.len(),
            "Composed inherited agent source"
        );

        let mut parts: Vec<&str> = vec![title];
        if !parsed.preamble.is_empty() {
            parts.push(&parsed.preamble);
        }
        parts.extend(raw_without_from(&inherited.blocks));
        parts.extend(raw_without_from(&parsed.blocks));
        Ok(parts.join("\n\n"))
    }
    .boxed()
}

fn raw_without_from(blocks: &[CommitmentBlock]) -> impl Iterator<Item = &str> {
    blocks
        .iter()
        .filter(|block| block.kind != CommitmentKind::From)
        .map(|block| block.raw.as_str())
}

/// Expand IMPORT commitments in place.
///
/// An imported agent contributes its commitments (its own imports expanded,
/// FROM and IMPORT lines dropped) right after the IMPORT line. An imported file
/// contributes a KNOWLEDGE commitment with its text. The IMPORT lines of
/// `source` are kept. Sources without IMPORT come back unchanged.
pub async fn expand_imports(
    source: &str,
    resolver: &AgentReferenceResolver,
    scope: &ResolutionScope,
) -> Result<String> {
    expand(source, resolver, scope, true).await
}

fn expand<'a>(
    source: &'a str,
    resolver: &'a AgentReferenceResolver,
    scope: &'a ResolutionScope,
    keep_imports: bool,
) -> BoxFuture<'a, Result<String>> {
    async move {
        let parsed = parse_book(source);
        let Some(title) = parsed.title.clone() else {
            return Ok(source.to_string());
        };
        if parsed.blocks_of(CommitmentKind::Import).next().is_none() {
            return Ok(source.to_string());
        }

        let expansions = join_all(
            parsed
                .blocks
                .iter()
                .map(|block| expand_block(block, resolver, scope)),
        )
        .await;

        let mut parts: Vec<String> = vec![title];
        if !parsed.preamble.is_empty() {
            parts.push(parsed.preamble.clone());
        }
        for (block, expansion) in parsed.blocks.iter().zip(expansions) {
            if block.kind != CommitmentKind::Import || keep_imports {
                parts.push(block.raw.clone());
            }
            parts.extend(expansion?);
        }
        Ok(parts.join("\n\n"))
    }
    .boxed()
}

async fn expand_block(
    block: &CommitmentBlock,
    resolver: &AgentReferenceResolver,
    scope: &ResolutionScope,
) -> Result<Vec<String>> {
    if block.kind != CommitmentKind::Import {
        return Ok(Vec::new());
    }
    let scope = scope.at(IssueLocation {
        kind: CommitmentKind::Import,
        line: block.span.start_line,
    });

    match links::classify_import_target(block.content.trim()) {
        Some(ImportTarget::Agent(url)) => {
            let Some(agent) = resolver.resolve(&url, &scope).await else {
                return Ok(Vec::new());
            };
            let Some(child) = scope.enter_all(agent_keys(&url, &agent)) else {
                return Ok(Vec::new());
            };
            let imported = expand(&agent.source, resolver, &child, false).await?;
            Ok(parse_book(&imported)
                .blocks
                .into_iter()
                .filter(|imported| imported.kind != CommitmentKind::From)
                .map(|imported| imported.raw)
                .collect())
        }
        Some(ImportTarget::File(reference)) => Ok(resolver
            .fetch_file(&reference, &scope)
            .await
            .map(|text| knowledge_block(&text))
            .into_iter()
            .collect()),
        // the fold reports malformed targets
        None => Ok(Vec::new()),
    }
}

/// KNOWLEDGE block holding `text`. Continuation lines that would open a
/// commitment are quoted so imported text stays inside the block.
fn knowledge_block(text: &str) -> String {
    let registry = CommitmentRegistry::standard();
    let body = text
        .trim()
        .lines()
        .enumerate()
        .map(|(index, line)| {
            if index > 0 && registry.match_line(line).is_some() {
                format!("> {}", line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("KNOWLEDGE {}", body)
}
