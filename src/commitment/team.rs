//! TEAM: teammate extraction.
//!
//! Each line is tokenized into URLs and the prose between them. A teammate's
//! instructions come from the text after its URL, falling back to the text
//! before it, falling back to the whole line with every URL cut out.

use super::{ApplyContext, CommitmentKind, Strictness};
use crate::book::CommitmentBlock;
use crate::error::{BookError, Result};
use crate::links::{is_valid_agent_url, scan_urls, teammate_label, UrlToken};
use crate::requirements::{AgentCapability, AgentModelRequirements, SystemMessageSection, TeamTeammate};
use std::collections::HashSet;

const CLAUSE_PUNCTUATION: &[char] = &['.', '?', '!', ';', ','];
const CLAUSE_CONJUNCTIONS: &[&str] = &[" and ", " or "];
const STRAY_CHARS: &[char] = &[',', '.', ';', ':', '!', '?', '-', '–', '—', '(', ')', '[', ']', '"', '\''];
const LEADING_FILLER: &[&str] = &["a", "an", "the", "and", "or", "to", "with"];

/// Extract teammates from the content of a TEAM commitment.
///
/// Invalid agent URLs fail in strict mode and are skipped in lenient mode.
/// A URL appearing twice yields one teammate, the first occurrence wins.
pub fn parse_team_teammates(content: &str, strictness: Strictness) -> Result<Vec<TeamTeammate>> {
    let mut teammates = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for line in content.lines() {
        let tokens = scan_urls(line);
        for (index, token) in tokens.iter().enumerate() {
            if !is_valid_agent_url(&token.url) {
                if strictness.is_strict() {
                    return Err(BookError::InvalidTeammate {
                        url: token.url.clone(),
                        line: line.trim().to_string(),
                    });
                }
                tracing::debug!(url = %token.url, "Skipping invalid teammate URL");
                continue;
            }
            if !seen.insert(token.url.clone()) {
                continue;
            }

            teammates.push(TeamTeammate {
                url: token.url.clone(),
                label: teammate_label(&token.url),
                instructions: derive_instructions(line, &tokens, index),
            });
        }
    }

    Ok(teammates)
}

fn derive_instructions(line: &str, tokens: &[UrlToken], index: usize) -> String {
    let token = &tokens[index];
    let next = tokens.get(index + 1);
    let previous = index.checked_sub(1).map(|i| &tokens[i]);

    let suffix = &line[token.end..next.map(|t| t.start).unwrap_or(line.len())];
    let suffix = if next.is_some() {
        until_first_clause_break(trim_stray(suffix))
    } else {
        suffix
    };

    let prefix = &line[previous.map(|t| t.end).unwrap_or(0)..token.start];
    let prefix = if previous.is_some() {
        after_last_clause_break(trim_stray(prefix))
    } else {
        prefix
    };

    [normalize_instruction(suffix), normalize_instruction(prefix)]
        .into_iter()
        .find(|candidate| !candidate.is_empty())
        .unwrap_or_else(|| normalize_instruction(&without_urls(line, tokens)))
}

fn clause_breaks(text: &str) -> Vec<(usize, usize)> {
    let lower = text.to_ascii_lowercase();
    let mut breaks: Vec<(usize, usize)> = text
        .char_indices()
        .filter(|(_, c)| CLAUSE_PUNCTUATION.contains(c))
        .map(|(i, c)| (i, i + c.len_utf8()))
        .collect();
    for conjunction in CLAUSE_CONJUNCTIONS {
        breaks.extend(
            lower
                .match_indices(conjunction)
                .map(|(i, m)| (i, i + m.len())),
        );
    }
    breaks.sort_unstable();
    breaks
}

fn until_first_clause_break(text: &str) -> &str {
    match clause_breaks(text).first() {
        Some((start, _)) => &text[..*start],
        None => text,
    }
}

fn after_last_clause_break(text: &str) -> &str {
    match clause_breaks(text).iter().map(|(_, end)| *end).max() {
        Some(end) => &text[end..],
        None => text,
    }
}

fn trim_stray(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || STRAY_CHARS.contains(&c))
}

fn without_urls(line: &str, tokens: &[UrlToken]) -> String {
    let mut result = String::with_capacity(line.len());
    let mut cursor = 0;
    for token in tokens {
        result.push_str(&line[cursor..token.start]);
        result.push(' ');
        cursor = token.end;
    }
    result.push_str(&line[cursor..]);
    result
}

/// Collapse whitespace, drop leading filler words and stray punctuation.
fn normalize_instruction(text: &str) -> String {
    let tokens = scan_urls(text);
    let text = if tokens.is_empty() {
        text.to_string()
    } else {
        without_urls(text, &tokens)
    };

    let mut words: Vec<&str> = trim_stray(&text).split_whitespace().collect();
    loop {
        let Some(first) = words.first() else {
            break;
        };
        let bare = trim_stray(first);
        if bare.is_empty()
            || LEADING_FILLER
                .iter()
                .any(|filler| bare.eq_ignore_ascii_case(filler))
        {
            words.remove(0);
        } else {
            break;
        }
    }

    trim_stray(&words.join(" ")).to_string()
}

/// Fold a TEAM block: one team capability per teammate plus a section
/// listing them.
pub fn apply_team(
    requirements: AgentModelRequirements,
    block: &CommitmentBlock,
    context: ApplyContext,
) -> Result<AgentModelRequirements> {
    let teammates = parse_team_teammates(&block.content, context.strictness)?;
    if teammates.is_empty() {
        return Ok(requirements);
    }

    let listing = teammates
        .iter()
        .map(|teammate| {
            if teammate.instructions.is_empty() {
                format!("- {} ({})", teammate.label, teammate.url)
            } else {
                format!("- {} ({}): {}", teammate.label, teammate.url, teammate.instructions)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    let requirements = requirements.push_section(SystemMessageSection::new(
        CommitmentKind::Team,
        format!("You can consult these teammates:\n{}", listing),
    ));
    Ok(teammates
        .into_iter()
        .fold(requirements, |requirements, teammate| {
            requirements.push_capability(AgentCapability::team(teammate))
        }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_support_lead_example() {
        let teammates = parse_team_teammates(
            "Ask https://s6.ptbk.io/benjamin-white, our support lead, for billing questions.",
            Strictness::Lenient,
        )
        .unwrap();

        assert_eq!(teammates.len(), 1);
        assert_eq!(teammates[0].url, "https://s6.ptbk.io/benjamin-white");
        assert_eq!(teammates[0].label, "Benjamin White");
        assert!(teammates[0]
            .instructions
            .contains("our support lead, for billing questions"));
        assert!(!teammates[0].instructions.starts_with(','));
        assert!(!teammates[0].instructions.contains("https://"));
    }

    #[test]
    fn splits_instructions_between_urls_on_one_line() {
        let teammates = parse_team_teammates(
            "Consult https://a.io/legal-team for contracts, and https://a.io/tax-desk for taxes.",
            Strictness::Lenient,
        )
        .unwrap();

        assert_eq!(teammates.len(), 2);
        assert_eq!(teammates[0].label, "Legal Team");
        assert_eq!(teammates[0].instructions, "for contracts");
        assert_eq!(teammates[1].label, "Tax Desk");
        assert_eq!(teammates[1].instructions, "for taxes");
    }

    #[test]
    fn falls_back_to_prefix_when_suffix_is_empty() {
        let teammates =
            parse_team_teammates("For legal questions ask https://a.io/lawyer", Strictness::Lenient)
                .unwrap();
        assert_eq!(teammates[0].instructions, "For legal questions ask");
    }

    #[test]
    fn falls_back_to_whole_line_and_strips_fillers() {
        let teammates = parse_team_teammates(
            "https://a.io/anna and https://a.io/bob handle onboarding",
            Strictness::Lenient,
        )
        .unwrap();
        assert_eq!(teammates[0].instructions, "handle onboarding");
        assert_eq!(teammates[1].instructions, "handle onboarding");
    }

    #[test]
    fn deduplicates_urls_across_lines() {
        let teammates = parse_team_teammates(
            "https://a.io/anna for sales\nAlso https://a.io/anna for marketing",
            Strictness::Lenient,
        )
        .unwrap();
        assert_eq!(teammates.len(), 1);
        assert_eq!(teammates[0].instructions, "for sales");
    }

    #[test]
    fn invalid_urls_are_skipped_when_lenient() {
        let teammates = parse_team_teammates(
            "See https://a.io/handbook.pdf and https://a.io/anna",
            Strictness::Lenient,
        )
        .unwrap();
        assert_eq!(teammates.len(), 1);
        assert_eq!(teammates[0].url, "https://a.io/anna");
    }

    #[test]
    fn invalid_urls_fail_when_strict() {
        let err = parse_team_teammates("See https://a.io/handbook.pdf", Strictness::Strict)
            .unwrap_err();
        assert!(matches!(err, BookError::InvalidTeammate { ref url, .. } if url == "https://a.io/handbook.pdf"));
    }

    #[test]
    fn lines_without_urls_yield_nothing() {
        assert!(parse_team_teammates("Just prose.", Strictness::Strict)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn apply_team_adds_capabilities_in_order() {
        let block = CommitmentBlock::synthetic(
            CommitmentKind::Team,
            "https://a.io/anna for sales\nhttps://a.io/bob for support",
        );
        let requirements =
            apply_team(AgentModelRequirements::new(), &block, ApplyContext::default()).unwrap();
        let urls: Vec<_> = requirements.teammates().iter().map(|t| t.url.clone()).collect();
        assert_eq!(urls, vec!["https://a.io/anna", "https://a.io/bob"]);
        assert_eq!(requirements.sections.len(), 1);
        assert!(requirements.sections[0].content.contains("- Anna (https://a.io/anna): for sales"));
    }
}
