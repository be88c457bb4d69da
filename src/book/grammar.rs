//! Block extraction.
//!
//! The first non-empty line is always the title, even when it starts with a
//! keyword ("Model Citizen", "Team Lead"). After it, a block starts at a line
//! whose leading words form a registered keyword and runs until the next such
//! line. Lines between the title and the first block are the preamble.

use super::block::{CommitmentBlock, SourceSpan};
use crate::commitment::{CommitmentKind, CommitmentRegistry};
use serde::{Deserialize, Serialize};

/// A Book source split into title, preamble and commitment blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedBook {
    pub title: Option<String>,
    pub preamble: String,
    pub blocks: Vec<CommitmentBlock>,
}

impl ParsedBook {
    pub fn blocks_of(&self, kind: CommitmentKind) -> impl Iterator<Item = &CommitmentBlock> {
        self.blocks.iter().filter(move |block| block.kind == kind)
    }

    pub fn last_block_of(&self, kind: CommitmentKind) -> Option<&CommitmentBlock> {
        self.blocks_of(kind).last()
    }

    /// Render back to Book text: title, preamble, then each block's raw text.
    pub fn to_source(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(title) = &self.title {
            parts.push(title);
        }
        if !self.preamble.is_empty() {
            parts.push(&self.preamble);
        }
        parts.extend(self.blocks.iter().map(|block| block.raw.as_str()));
        parts.join("\n\n")
    }
}

struct OpenBlock {
    kind: CommitmentKind,
    keyword: String,
    start_line: usize,
    lines: Vec<String>,
    first_content: String,
}

impl OpenBlock {
    fn close(self) -> CommitmentBlock {
        let mut lines = self.lines;
        while lines.last().map(|line| line.trim().is_empty()).unwrap_or(false) {
            lines.pop();
        }
        let end_line = self.start_line + lines.len().saturating_sub(1);

        let mut content_lines = vec![self.first_content];
        content_lines.extend(lines.iter().skip(1).cloned());
        let content = content_lines.join("\n").trim().to_string();

        CommitmentBlock {
            kind: self.kind,
            keyword: self.keyword,
            content,
            raw: lines.join("\n"),
            span: SourceSpan {
                start_line: self.start_line,
                end_line,
            },
        }
    }
}

/// Parse with the standard commitment registry.
pub fn parse_book(source: &str) -> ParsedBook {
    parse_book_with(source, CommitmentRegistry::standard())
}

/// Parse a Book source. Never fails; a source without commitments is a
/// title-only agent.
pub fn parse_book_with(source: &str, registry: &CommitmentRegistry) -> ParsedBook {
    let mut title: Option<String> = None;
    let mut preamble_lines: Vec<&str> = Vec::new();
    let mut blocks = Vec::new();
    let mut current: Option<OpenBlock> = None;

    for (index, line) in source.lines().enumerate() {
        let line_number = index + 1;

        if title.is_none() {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                title = Some(trimmed.to_string());
            }
            continue;
        }

        if let Some(found) = registry.match_line(line) {
            if let Some(open) = current.take() {
                blocks.push(open.close());
            }
            current = Some(OpenBlock {
                kind: found.kind,
                keyword: line[found.keyword_start..found.keyword_end].to_string(),
                start_line: line_number,
                lines: vec![line.trim_end().to_string()],
                first_content: line[found.keyword_end..].trim().to_string(),
            });
            continue;
        }

        match current.as_mut() {
            Some(open) => open.lines.push(line.trim_end().to_string()),
            None => preamble_lines.push(line),
        }
    }

    if let Some(open) = current.take() {
        blocks.push(open.close());
    }

    ParsedBook {
        title,
        preamble: preamble_lines.join("\n").trim().to_string(),
        blocks,
    }
}
