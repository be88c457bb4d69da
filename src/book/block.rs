use crate::commitment::CommitmentKind;
use serde::{Deserialize, Serialize};

/// 1-based, inclusive line range of a block in its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start_line: usize,
    pub end_line: usize,
}

/// One commitment as written in a Book source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentBlock {
    pub kind: CommitmentKind,
    /// Keyword exactly as written, e.g. `Meta  image`.
    pub keyword: String,
    /// Text after the keyword up to the next commitment, trimmed.
    pub content: String,
    /// Original lines of the block without trailing blank lines.
    pub raw: String,
    pub span: SourceSpan,
}

impl CommitmentBlock {
    /// Build a block that did not come from a parsed source.
    pub fn synthetic(kind: CommitmentKind, content: impl Into<String>) -> Self {
        let content = content.into();
        let raw = if content.is_empty() {
            kind.keyword().to_string()
        } else {
            format!("{} {}", kind.keyword(), content)
        };
        let line_count = raw.lines().count().max(1);
        Self {
            kind,
            keyword: kind.keyword().to_string(),
            content,
            raw,
            span: SourceSpan {
                start_line: 1,
                end_line: line_count,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Lines of the content with their 1-based source line numbers.
    ///
    /// The first content line shares the keyword line.
    pub fn content_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        let start = self.span.start_line;
        let offset = self.raw.lines().count().saturating_sub(self.content.lines().count());
        self.content
            .lines()
            .enumerate()
            .map(move |(index, line)| (start + offset + index, line))
    }
}
