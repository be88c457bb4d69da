//! The closed set of commitment kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Every commitment the Book language knows about.
///
/// Adding a variant forces every exhaustive `match` in the crate (definitions,
/// section labels) to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitmentKind {
    BookVersion,
    Persona,
    Goal,
    Knowledge,
    Memory,
    Rule,
    Style,
    Expect,
    Format,
    Sample,
    Scenario,
    Language,
    Model,
    InitialMessage,
    UserMessage,
    AgentMessage,
    MetaImage,
    MetaLink,
    MetaColor,
    MetaFont,
    Meta,
    Note,
    Delete,
    Open,
    Closed,
    From,
    Import,
    Team,
    UseBrowser,
    UseSearchEngine,
    UseEmail,
    UseTime,
}

impl CommitmentKind {
    pub const ALL: [CommitmentKind; 32] = [
        CommitmentKind::BookVersion,
        CommitmentKind::Persona,
        CommitmentKind::Goal,
        CommitmentKind::Knowledge,
        CommitmentKind::Memory,
        CommitmentKind::Rule,
        CommitmentKind::Style,
        CommitmentKind::Expect,
        CommitmentKind::Format,
        CommitmentKind::Sample,
        CommitmentKind::Scenario,
        CommitmentKind::Language,
        CommitmentKind::Model,
        CommitmentKind::InitialMessage,
        CommitmentKind::UserMessage,
        CommitmentKind::AgentMessage,
        CommitmentKind::MetaImage,
        CommitmentKind::MetaLink,
        CommitmentKind::MetaColor,
        CommitmentKind::MetaFont,
        CommitmentKind::Meta,
        CommitmentKind::Note,
        CommitmentKind::Delete,
        CommitmentKind::Open,
        CommitmentKind::Closed,
        CommitmentKind::From,
        CommitmentKind::Import,
        CommitmentKind::Team,
        CommitmentKind::UseBrowser,
        CommitmentKind::UseSearchEngine,
        CommitmentKind::UseEmail,
        CommitmentKind::UseTime,
    ];

    /// Keywords that open a block of this kind; the first one is canonical.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            CommitmentKind::BookVersion => &["BOOK VERSION"],
            CommitmentKind::Persona => &["PERSONA"],
            CommitmentKind::Goal => &["GOAL"],
            CommitmentKind::Knowledge => &["KNOWLEDGE"],
            CommitmentKind::Memory => &["MEMORY"],
            CommitmentKind::Rule => &["RULE", "RULES"],
            CommitmentKind::Style => &["STYLE"],
            CommitmentKind::Expect => &["EXPECT"],
            CommitmentKind::Format => &["FORMAT"],
            CommitmentKind::Sample => &["SAMPLE", "EXAMPLE"],
            CommitmentKind::Scenario => &["SCENARIO"],
            CommitmentKind::Language => &["LANGUAGE"],
            CommitmentKind::Model => &["MODEL"],
            CommitmentKind::InitialMessage => &["INITIAL MESSAGE"],
            CommitmentKind::UserMessage => &["USER MESSAGE"],
            CommitmentKind::AgentMessage => &["AGENT MESSAGE"],
            CommitmentKind::MetaImage => &["META IMAGE"],
            CommitmentKind::MetaLink => &["META LINK"],
            CommitmentKind::MetaColor => &["META COLOR"],
            CommitmentKind::MetaFont => &["META FONT"],
            CommitmentKind::Meta => &["META"],
            CommitmentKind::Note => &["NOTE", "COMMENT"],
            CommitmentKind::Delete => &["DELETE", "CANCEL", "DISCARD", "REMOVE"],
            CommitmentKind::Open => &["OPEN"],
            CommitmentKind::Closed => &["CLOSED"],
            CommitmentKind::From => &["FROM"],
            CommitmentKind::Import => &["IMPORT"],
            CommitmentKind::Team => &["TEAM"],
            CommitmentKind::UseBrowser => &["USE BROWSER"],
            CommitmentKind::UseSearchEngine => &["USE SEARCH ENGINE"],
            CommitmentKind::UseEmail => &["USE EMAIL"],
            CommitmentKind::UseTime => &["USE TIME"],
        }
    }

    pub fn keyword(self) -> &'static str {
        self.keywords()[0]
    }

    /// Label used when the commitment contributes a system message section.
    pub fn section_label(self) -> Option<&'static str> {
        match self {
            CommitmentKind::Persona => Some("Persona"),
            CommitmentKind::Goal => Some("Goal"),
            CommitmentKind::Knowledge => Some("Knowledge"),
            CommitmentKind::Memory => Some("Memory"),
            CommitmentKind::Rule => Some("Rule"),
            CommitmentKind::Style => Some("Style"),
            CommitmentKind::Expect => Some("Expected output"),
            CommitmentKind::Format => Some("Output format"),
            CommitmentKind::Sample => Some("Example"),
            CommitmentKind::Scenario => Some("Scenario"),
            CommitmentKind::Team => Some("Team"),
            CommitmentKind::UseBrowser
            | CommitmentKind::UseSearchEngine
            | CommitmentKind::UseEmail
            | CommitmentKind::UseTime => Some("Tool"),
            CommitmentKind::BookVersion
            | CommitmentKind::Language
            | CommitmentKind::Model
            | CommitmentKind::InitialMessage
            | CommitmentKind::UserMessage
            | CommitmentKind::AgentMessage
            | CommitmentKind::MetaImage
            | CommitmentKind::MetaLink
            | CommitmentKind::MetaColor
            | CommitmentKind::MetaFont
            | CommitmentKind::Meta
            | CommitmentKind::Note
            | CommitmentKind::Delete
            | CommitmentKind::Open
            | CommitmentKind::Closed
            | CommitmentKind::From
            | CommitmentKind::Import => None,
        }
    }
}

impl fmt::Display for CommitmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
