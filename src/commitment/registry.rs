//! Commitment registry.
//!
//! An immutable table of definitions assembled once. The standard table holds
//! the built-in definition of every [`CommitmentKind`]; custom tables can be
//! built for tests or restricted dialects.

use super::{CommitmentDefinition, CommitmentKind};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// A keyword found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch {
    pub kind: CommitmentKind,
    /// Byte offsets of the keyword as written in the line.
    pub keyword_start: usize,
    pub keyword_end: usize,
}

#[derive(Debug, Clone)]
struct KeywordEntry {
    words: Vec<&'static str>,
    kind: CommitmentKind,
}

/// Read-only table of commitment definitions.
#[derive(Debug, Clone)]
pub struct CommitmentRegistry {
    definitions: BTreeMap<CommitmentKind, CommitmentDefinition>,
    /// Longest keywords first so `META IMAGE` wins over `META`.
    keywords: Vec<KeywordEntry>,
    max_keyword_words: usize,
}

/// Collects definitions before the table is frozen.
#[derive(Debug, Default)]
pub struct CommitmentRegistryBuilder {
    definitions: BTreeMap<CommitmentKind, CommitmentDefinition>,
}

impl CommitmentRegistryBuilder {
    /// Register a definition; a later registration of the same kind replaces
    /// the earlier one.
    pub fn register(mut self, definition: CommitmentDefinition) -> Self {
        self.definitions.insert(definition.kind, definition);
        self
    }

    pub fn build(self) -> CommitmentRegistry {
        let mut keywords: Vec<KeywordEntry> = self
            .definitions
            .keys()
            .flat_map(|kind| {
                kind.keywords().iter().map(move |keyword| KeywordEntry {
                    words: keyword.split_whitespace().collect(),
                    kind: *kind,
                })
            })
            .collect();
        keywords.sort_by(|a, b| {
            b.words
                .len()
                .cmp(&a.words.len())
                .then_with(|| b.words.concat().len().cmp(&a.words.concat().len()))
                .then_with(|| a.words.cmp(&b.words))
        });
        let max_keyword_words = keywords.iter().map(|entry| entry.words.len()).max().unwrap_or(0);

        CommitmentRegistry {
            definitions: self.definitions,
            keywords,
            max_keyword_words,
        }
    }
}

impl CommitmentRegistry {
    pub fn builder() -> CommitmentRegistryBuilder {
        CommitmentRegistryBuilder::default()
    }

    /// The process-wide table of built-in definitions.
    pub fn standard() -> &'static CommitmentRegistry {
        static STANDARD: OnceLock<CommitmentRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| {
            CommitmentKind::ALL
                .iter()
                .fold(Self::builder(), |builder, kind| builder.register(kind.definition()))
                .build()
        })
    }

    /// Every kind the language defines, independent of any table.
    pub fn all_commitment_types() -> &'static [CommitmentKind] {
        &CommitmentKind::ALL
    }

    pub fn lookup(&self, kind: CommitmentKind) -> Option<&CommitmentDefinition> {
        self.definitions.get(&kind)
    }

    /// Look up by keyword text such as `meta image` or `RULES`.
    pub fn lookup_keyword(&self, keyword: &str) -> Option<&CommitmentDefinition> {
        let words: Vec<&str> = keyword.split_whitespace().collect();
        self.keywords
            .iter()
            .find(|entry| {
                entry.words.len() == words.len()
                    && entry
                        .words
                        .iter()
                        .zip(&words)
                        .all(|(expected, actual)| actual.eq_ignore_ascii_case(expected))
            })
            .and_then(|entry| self.lookup(entry.kind))
    }

    /// Registered kinds in declaration order.
    pub fn list_all(&self) -> Vec<CommitmentKind> {
        self.definitions.keys().copied().collect()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &CommitmentDefinition> {
        self.definitions.values()
    }

    /// Match a registered keyword at the start of `line`.
    ///
    /// The keyword must be followed by whitespace or the end of the line.
    pub fn match_line(&self, line: &str) -> Option<KeywordMatch> {
        let words = leading_words(line, self.max_keyword_words);
        if words.is_empty() {
            return None;
        }

        self.keywords.iter().find_map(|entry| {
            let count = entry.words.len();
            if words.len() < count {
                return None;
            }
            let matches = entry
                .words
                .iter()
                .zip(&words)
                .all(|(expected, (start, end))| line[*start..*end].eq_ignore_ascii_case(expected));
            matches.then(|| KeywordMatch {
                kind: entry.kind,
                keyword_start: words[0].0,
                keyword_end: words[count - 1].1,
            })
        })
    }
}

/// Byte spans of up to `max` whitespace-separated words at the start of `line`.
fn leading_words(line: &str, max: usize) -> Vec<(usize, usize)> {
    let mut words = Vec::with_capacity(max);
    let mut start: Option<usize> = None;

    for (index, c) in line.char_indices() {
        if c.is_whitespace() {
            if let Some(word_start) = start.take() {
                words.push((word_start, index));
                if words.len() == max {
                    return words;
                }
            }
        } else if start.is_none() {
            start = Some(index);
        }
    }
    if let Some(word_start) = start {
        if words.len() < max {
            words.push((word_start, line.len()));
        }
    }
    words
}
