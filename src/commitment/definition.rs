//! Commitment definitions: metadata plus the fold function for each kind.

use super::{import, meta, settings, team, text, tool_use, CommitmentKind, Strictness};
use crate::book::CommitmentBlock;
use crate::error::{BookError, Result};
use crate::requirements::AgentModelRequirements;
use std::fmt;

/// Options every fold function receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyContext {
    pub strictness: Strictness,
}

pub type ApplyFn =
    fn(AgentModelRequirements, &CommitmentBlock, ApplyContext) -> Result<AgentModelRequirements>;

/// Behavior and documentation of one commitment kind.
#[derive(Clone, Copy)]
pub struct CommitmentDefinition {
    pub kind: CommitmentKind,
    pub description: &'static str,
    pub icon: &'static str,
    pub documentation: &'static str,
    /// Whether an empty block is malformed.
    pub requires_content: bool,
    apply: ApplyFn,
}

impl CommitmentDefinition {
    pub const fn new(
        kind: CommitmentKind,
        description: &'static str,
        icon: &'static str,
        documentation: &'static str,
        apply: ApplyFn,
    ) -> Self {
        Self {
            kind,
            description,
            icon,
            documentation,
            requires_content: true,
            apply,
        }
    }

    pub const fn without_required_content(mut self) -> Self {
        self.requires_content = false;
        self
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        self.kind.keywords()
    }

    /// Fold one block into the requirements.
    pub fn apply_to_agent_model_requirements(
        &self,
        requirements: AgentModelRequirements,
        block: &CommitmentBlock,
        context: ApplyContext,
    ) -> Result<AgentModelRequirements> {
        (self.apply)(requirements, block, context)
    }
}

impl fmt::Debug for CommitmentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitmentDefinition")
            .field("kind", &self.kind)
            .field("description", &self.description)
            .field("requires_content", &self.requires_content)
            .finish_non_exhaustive()
    }
}

/// Error for content a definition cannot interpret.
pub(crate) fn malformed(block: &CommitmentBlock, message: impl Into<String>) -> BookError {
    BookError::MalformedCommitment {
        kind: block.kind,
        message: message.into(),
        content: block.content.clone(),
        block: block.raw.clone(),
    }
}

impl CommitmentKind {
    /// The built-in definition of this kind.
    pub fn definition(self) -> CommitmentDefinition {
        use CommitmentKind as K;
        match self {
            K::BookVersion => CommitmentDefinition::new(
                self,
                "Version of the Book language the source is written in",
                "🔖",
                "BOOK VERSION 2.0\n\nRecorded in the agent metadata as `book_version`.",
                meta::apply_book_version,
            ),
            K::Persona => CommitmentDefinition::new(
                self,
                "Who the agent is",
                "👤",
                "PERSONA You are a friendly accountant.\n\nMultiple personas are appended in order.",
                text::append_section,
            ),
            K::Goal => CommitmentDefinition::new(
                self,
                "What the agent is trying to achieve",
                "🎯",
                "GOAL Help the user file their taxes.",
                text::append_section,
            ),
            K::Knowledge => CommitmentDefinition::new(
                self,
                "Facts or sources the agent knows",
                "🧠",
                "KNOWLEDGE The office is open 9-17.\nKNOWLEDGE https://example.com/handbook.pdf",
                text::append_section,
            ),
            K::Memory => CommitmentDefinition::new(
                self,
                "Things the agent remembers from earlier conversations",
                "💾",
                "MEMORY The user prefers short answers.",
                text::append_section,
            ),
            K::Rule => CommitmentDefinition::new(
                self,
                "Constraint the agent must follow",
                "⚖️",
                "RULE Never disclose client names.\n\nAlias: RULES.",
                text::append_section,
            ),
            K::Style => CommitmentDefinition::new(
                self,
                "How the agent writes",
                "🖋️",
                "STYLE Write in short, plain sentences.",
                text::append_section,
            ),
            K::Expect => CommitmentDefinition::new(
                self,
                "What a good answer looks like",
                "✅",
                "EXPECT A single paragraph answer.",
                text::append_section,
            ),
            K::Format => CommitmentDefinition::new(
                self,
                "Required output format",
                "📐",
                "FORMAT Markdown with a summary table.",
                text::append_section,
            ),
            K::Sample => CommitmentDefinition::new(
                self,
                "Example of the expected behavior",
                "🔍",
                "SAMPLE Q: What is VAT? A: A consumption tax.\n\nAlias: EXAMPLE.",
                text::append_section,
            ),
            K::Scenario => CommitmentDefinition::new(
                self,
                "Situation the agent operates in",
                "🎬",
                "SCENARIO The user calls the support hotline.",
                text::append_section,
            ),
            K::Language => CommitmentDefinition::new(
                self,
                "Language the agent answers in",
                "🌐",
                "LANGUAGE Czech\n\nA later LANGUAGE replaces an earlier one.",
                settings::apply_language,
            ),
            K::Model => CommitmentDefinition::new(
                self,
                "Model selection and sampling parameters",
                "⚙️",
                "MODEL gpt-4o\nMODEL TEMPERATURE 0.2\nMODEL TOP_P 0.9\nMODEL MAX_TOKENS 2048\nMODEL SEED 7\n\nLater values replace earlier ones.",
                settings::apply_model,
            ),
            K::InitialMessage => CommitmentDefinition::new(
                self,
                "First message the agent sends",
                "👋",
                "INITIAL MESSAGE Hello, how can I help?",
                settings::apply_initial_message,
            ),
            K::UserMessage => CommitmentDefinition::new(
                self,
                "User turn of a sample conversation",
                "🧑",
                "USER MESSAGE How much is the fee?",
                settings::apply_user_message,
            ),
            K::AgentMessage => CommitmentDefinition::new(
                self,
                "Agent turn of a sample conversation",
                "🤖",
                "AGENT MESSAGE The fee is 20 EUR.",
                settings::apply_agent_message,
            ),
            K::MetaImage => CommitmentDefinition::new(
                self,
                "Avatar image of the agent",
                "🖼️",
                "META IMAGE https://example.com/avatar.png",
                meta::apply_meta_image,
            ),
            K::MetaLink => CommitmentDefinition::new(
                self,
                "Link related to the agent",
                "🔗",
                "META LINK https://example.com/about\n\nLinks accumulate.",
                meta::apply_meta_link,
            ),
            K::MetaColor => CommitmentDefinition::new(
                self,
                "Brand color of the agent",
                "🎨",
                "META COLOR #ff6600",
                meta::apply_meta_color,
            ),
            K::MetaFont => CommitmentDefinition::new(
                self,
                "Font used to present the agent",
                "🔤",
                "META FONT Inter",
                meta::apply_meta_font,
            ),
            K::Meta => CommitmentDefinition::new(
                self,
                "Arbitrary metadata entry",
                "🏷️",
                "META TAGLINE Your friendly accountant\n\nThe first word is the key.",
                meta::apply_meta,
            ),
            K::Note => CommitmentDefinition::new(
                self,
                "Comment for humans; ignored by the model",
                "📝",
                "NOTE Reviewed by legal in May.\n\nAlias: COMMENT.",
                settings::apply_note,
            )
            .without_required_content(),
            K::Delete => CommitmentDefinition::new(
                self,
                "Removes earlier commitments mentioning the given text",
                "🗑️",
                "DELETE French\n\nAliases: CANCEL, DISCARD, REMOVE.",
                settings::apply_delete,
            ),
            K::Open => CommitmentDefinition::new(
                self,
                "Agent may modify its own source",
                "🔓",
                "OPEN",
                settings::apply_open,
            )
            .without_required_content(),
            K::Closed => CommitmentDefinition::new(
                self,
                "Agent may not modify its own source",
                "🔒",
                "CLOSED",
                settings::apply_closed,
            )
            .without_required_content(),
            K::From => CommitmentDefinition::new(
                self,
                "Parent agent whose commitments are inherited",
                "🧬",
                "FROM https://s6.ptbk.io/base-agent\nFROM VOID\n\nWithout FROM the agent inherits from the configured base agent.",
                settings::apply_from,
            ),
            K::Import => CommitmentDefinition::new(
                self,
                "Pulls in another agent or a file at this position",
                "📥",
                "IMPORT https://s6.ptbk.io/benjamin-white\nIMPORT ./notes.txt\nIMPORT https://example.com/handbook.pdf",
                import::apply_import,
            )
            .without_required_content(),
            K::Team => CommitmentDefinition::new(
                self,
                "Teammate agents and when to consult them",
                "🤝",
                "TEAM Ask https://s6.ptbk.io/benjamin-white, our support lead, for billing questions.",
                team::apply_team,
            ),
            K::UseBrowser => CommitmentDefinition::new(
                self,
                "Agent can read web pages",
                "🌍",
                "USE BROWSER",
                tool_use::apply_tool_use,
            )
            .without_required_content(),
            K::UseSearchEngine => CommitmentDefinition::new(
                self,
                "Agent can search the web",
                "🔎",
                "USE SEARCH ENGINE Prefer official sources.",
                tool_use::apply_tool_use,
            )
            .without_required_content(),
            K::UseEmail => CommitmentDefinition::new(
                self,
                "Agent can send emails",
                "📧",
                "USE EMAIL Sign emails as the support team.",
                tool_use::apply_tool_use,
            )
            .without_required_content(),
            K::UseTime => CommitmentDefinition::new(
                self,
                "Agent can read the current time",
                "🕒",
                "USE TIME",
                tool_use::apply_tool_use,
            )
            .without_required_content(),
        }
    }
}
