//! Display profile of an agent, read from its raw source.

use crate::book::parse_book;
use crate::commitment::CommitmentKind;
use crate::identity::agent_name_from_title;
use serde::{Deserialize, Serialize};

/// What a client shows about an agent without compiling it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub agent_name: String,
    pub title: Option<String>,
    /// First PERSONA, falling back to the preamble.
    pub description: Option<String>,
    pub image: Option<String>,
    pub color: Option<String>,
    pub font: Option<String>,
    pub links: Vec<String>,
}

impl AgentProfile {
    pub fn from_source(source: &str) -> Self {
        let parsed = parse_book(source);
        let last_content = |kind: CommitmentKind| {
            parsed
                .last_block_of(kind)
                .map(|block| block.content.clone())
                .filter(|content| !content.is_empty())
        };

        let description = parsed
            .blocks_of(CommitmentKind::Persona)
            .map(|block| block.content.clone())
            .find(|content| !content.is_empty())
            .or_else(|| Some(parsed.preamble.clone()).filter(|p| !p.is_empty()));

        Self {
            agent_name: agent_name_from_title(parsed.title.as_deref().unwrap_or_default()),
            title: parsed.title.clone(),
            description,
            image: last_content(CommitmentKind::MetaImage),
            color: last_content(CommitmentKind::MetaColor),
            font: last_content(CommitmentKind::MetaFont),
            links: parsed
                .blocks_of(CommitmentKind::MetaLink)
                .map(|block| block.content.clone())
                .filter(|content| !content.is_empty())
                .collect(),
        }
    }
}
