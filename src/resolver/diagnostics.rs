//! Editor diagnostics for agent references that do not resolve.

use super::issues::{IssueLocation, IssueReason};
use super::scope::ResolutionScope;
use super::service::AgentReferenceResolver;
use crate::book::{parse_book, CommitmentBlock};
use crate::commitment::settings::is_void_parent;
use crate::commitment::CommitmentKind;
use crate::links::{self, ImportTarget};
use futures::future::join_all;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// One problem attached to a span of the source. Lines and columns are 1-based;
/// `end_column` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentReferenceDiagnostic {
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub line: usize,
    pub start_column: usize,
    pub end_column: usize,
    pub commitment_kind: CommitmentKind,
    pub reference: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedAgentReferenceDiagnostics {
    pub diagnostics: Vec<AgentReferenceDiagnostic>,
    /// References that do not exist, in source order, without duplicates.
    pub missing_agent_references: Vec<String>,
}

struct ReferenceSite {
    kind: CommitmentKind,
    reference: String,
    line: usize,
    start_column: usize,
    end_column: usize,
    /// Invalid as written; reported without a lookup.
    invalid: bool,
}

/// Check every FROM, IMPORT and TEAM agent reference of `source`.
///
/// Runs lenient and never fails: malformed commitments are reported or skipped.
/// Lookups share the resolver's cache, but their issues are not added to
/// [`list_unresolved_references`](AgentReferenceResolver::list_unresolved_references).
pub async fn create_unresolved_agent_reference_diagnostics(
    source: &str,
    resolver: &AgentReferenceResolver,
) -> UnresolvedAgentReferenceDiagnostics {
    let parsed = parse_book(source);
    let source_lines: Vec<&str> = source.lines().collect();
    let sites: Vec<ReferenceSite> = parsed
        .blocks
        .iter()
        .flat_map(|block| reference_sites(block, &source_lines))
        .collect();

    let checks = sites.iter().map(|site| async move {
        if site.invalid {
            return Some((
                DiagnosticSeverity::Warning,
                format!("'{}' is not a valid agent URL", site.reference),
                false,
            ));
        }
        let scope = ResolutionScope::local_only().at(IssueLocation {
            kind: site.kind,
            line: site.line,
        });
        if resolver.resolve(&site.reference, &scope).await.is_some() {
            return None;
        }
        let issue = scope.issues().snapshot().into_iter().next()?;
        let missing = issue.reason == IssueReason::NotFound;
        let severity = match issue.reason {
            IssueReason::NotFound | IssueReason::Cycle | IssueReason::InvalidReference => {
                DiagnosticSeverity::Error
            }
            IssueReason::Timeout | IssueReason::Fetch => DiagnosticSeverity::Warning,
        };
        Some((
            severity,
            format!("Agent '{}' could not be resolved: {}", site.reference, issue.reason),
            missing,
        ))
    });
    let outcomes = join_all(checks).await;

    let mut result = UnresolvedAgentReferenceDiagnostics::default();
    for (site, outcome) in sites.iter().zip(outcomes) {
        let Some((severity, message, missing)) = outcome else {
            continue;
        };
        if missing && !result.missing_agent_references.contains(&site.reference) {
            result.missing_agent_references.push(site.reference.clone());
        }
        result.diagnostics.push(AgentReferenceDiagnostic {
            severity,
            message,
            line: site.line,
            start_column: site.start_column,
            end_column: site.end_column,
            commitment_kind: site.kind,
            reference: site.reference.clone(),
        });
    }
    result
}

fn reference_sites(block: &CommitmentBlock, source_lines: &[&str]) -> Vec<ReferenceSite> {
    let site = |line: usize, reference: &str, invalid: bool| {
        let text = source_lines.get(line.wrapping_sub(1)).copied().unwrap_or_default();
        let (start_column, end_column) = column_range(text, reference);
        ReferenceSite {
            kind: block.kind,
            reference: reference.to_string(),
            line,
            start_column,
            end_column,
            invalid,
        }
    };

    match block.kind {
        CommitmentKind::From => {
            let parent = block.content.trim();
            if parent.is_empty() || is_void_parent(parent) {
                return Vec::new();
            }
            vec![site(block.span.start_line, parent, false)]
        }
        CommitmentKind::Import => match links::classify_import_target(block.content.trim()) {
            Some(ImportTarget::Agent(url)) => vec![site(block.span.start_line, &url, false)],
            _ => Vec::new(),
        },
        CommitmentKind::Team => block
            .content_lines()
            .flat_map(|(line, text)| {
                links::scan_urls(text)
                    .into_iter()
                    .map(|token| (line, token.url))
                    .collect::<Vec<_>>()
            })
            .map(|(line, url)| site(line, &url, !links::is_valid_agent_url(&url)))
            .collect(),
        _ => Vec::new(),
    }
}

/// Character columns of the first occurrence of `needle` on the line.
fn column_range(line: &str, needle: &str) -> (usize, usize) {
    match line.find(needle) {
        Some(byte_start) => {
            let start = line[..byte_start].chars().count() + 1;
            (start, start + needle.chars().count())
        }
        None => (1, line.chars().count() + 1),
    }
}
