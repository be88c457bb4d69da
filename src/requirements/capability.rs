//! Capabilities surfaced to clients of a compiled agent.

use crate::identity::AgentIdentity;
use serde::{Deserialize, Serialize};

/// One teammate declared by a TEAM commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTeammate {
    pub url: String,
    pub label: String,
    pub instructions: String,
}

/// What resolution learned about a teammate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTeammate {
    pub identity: AgentIdentity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentCapability {
    /// A teammate; `resolved` is filled once the reference was looked up.
    Team {
        teammate: TeamTeammate,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resolved: Option<ResolvedTeammate>,
    },
    Tool {
        name: String,
    },
}

impl AgentCapability {
    pub fn team(teammate: TeamTeammate) -> Self {
        AgentCapability::Team {
            teammate,
            resolved: None,
        }
    }

    pub fn is_team(&self) -> bool {
        matches!(self, AgentCapability::Team { .. })
    }
}
