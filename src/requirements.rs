//! Compiled agent model requirements.
//!
//! `AgentModelRequirements` is the accumulator every commitment folds into and
//! the final product handed to the model invocation layer.

pub mod capability;
pub mod tools;

pub use capability::{AgentCapability, ResolvedTeammate, TeamTeammate};
pub use tools::{StaticToolEnvironment, ToolBinding, ToolEnvironment, ToolFunction};

use crate::commitment::CommitmentKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One contribution to the system message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMessageSection {
    /// `None` for the free-text preamble written before the first commitment.
    pub kind: Option<CommitmentKind>,
    pub content: String,
}

impl SystemMessageSection {
    pub fn new(kind: CommitmentKind, content: impl Into<String>) -> Self {
        Self {
            kind: Some(kind),
            content: content.into(),
        }
    }

    pub fn preamble(content: impl Into<String>) -> Self {
        Self {
            kind: None,
            content: content.into(),
        }
    }

    fn render(&self) -> String {
        match self.kind.and_then(CommitmentKind::section_label) {
            Some(label) => format!("{}: {}", label, self.content),
            None => self.content.clone(),
        }
    }
}

/// Who speaks in a sample conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Agent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleMessage {
    pub role: MessageRole,
    pub content: String,
}

/// Fully compiled specification of one agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentModelRequirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_title: Option<String>,
    pub system_message: String,
    pub sections: Vec<SystemMessageSection>,
    pub capabilities: Vec<AgentCapability>,
    pub imported_agent_urls: Vec<String>,
    pub imported_file_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_agent_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_message: Option<String>,
    pub sample_messages: Vec<SampleMessage>,
    pub meta: BTreeMap<String, String>,
    pub links: Vec<String>,
    pub tools: Vec<ToolBinding>,
    /// Closed agents may not modify their own source.
    pub is_closed: bool,
}

impl AgentModelRequirements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_section(mut self, section: SystemMessageSection) -> Self {
        self.sections.push(section);
        self
    }

    pub fn push_capability(mut self, capability: AgentCapability) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// Bind a tool once; a second binding with the same name is ignored.
    pub fn bind_tool(mut self, binding: ToolBinding) -> Self {
        if !self.tools.iter().any(|tool| tool.name == binding.name) {
            self.capabilities.push(AgentCapability::Tool {
                name: binding.name.clone(),
            });
            self.tools.push(binding);
        }
        self
    }

    /// Drop every earlier section whose content mentions `needle`.
    pub fn remove_sections_matching(mut self, needle: &str) -> Self {
        let needle = needle.to_lowercase();
        self.sections
            .retain(|section| !section.content.to_lowercase().contains(&needle));
        self
    }

    /// Teammates declared by TEAM commitments, in source order.
    pub fn teammates(&self) -> Vec<&TeamTeammate> {
        self.capabilities
            .iter()
            .filter_map(|capability| match capability {
                AgentCapability::Team { teammate, .. } => Some(teammate),
                AgentCapability::Tool { .. } => None,
            })
            .collect()
    }

    /// Render `system_message` from the accumulated sections.
    pub fn finalize(mut self) -> Self {
        self.system_message = self
            .sections
            .iter()
            .map(SystemMessageSection::render)
            .collect::<Vec<_>>()
            .join("\n\n");
        self
    }
}
