//! In-memory agent collection.

use super::AgentCollection;
use crate::book::parse_book;
use crate::error::{BookError, Result};
use crate::identity::{agent_name_from_title, normalize_agent_name, AgentIdentity};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct StoredAgent {
    source: String,
    permanent_id: String,
    deleted: bool,
}

impl StoredAgent {
    fn identity(&self, agent_name: &str) -> AgentIdentity {
        AgentIdentity::new(agent_name, Some(self.permanent_id.clone()))
    }
}

#[derive(Debug, Default)]
struct State {
    /// Keyed by normalized agent name.
    agents: BTreeMap<String, StoredAgent>,
    created: u64,
}

/// Collection held entirely in memory, ordered by agent name.
#[derive(Debug, Default)]
pub struct InMemoryAgentCollection {
    state: RwLock<State>,
}

impl InMemoryAgentCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from sources, creating them in order.
    pub async fn with_sources<I, S>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let collection = Self::new();
        for source in sources {
            collection.create_agent(source.as_ref()).await?;
        }
        Ok(collection)
    }

    fn not_found(agent_name: &str) -> BookError {
        BookError::NotFound {
            agent_name: agent_name.to_string(),
        }
    }

    fn permanent_id_for(agent_name: &str, sequence: u64) -> String {
        let digest = blake3::hash(format!("{}:{}", agent_name, sequence).as_bytes());
        hex::encode(&digest.as_bytes()[..8])
    }

    fn list_where(&self, deleted: bool) -> Vec<AgentIdentity> {
        self.state
            .read()
            .agents
            .iter()
            .filter(|(_, agent)| agent.deleted == deleted)
            .map(|(name, agent)| agent.identity(name))
            .collect()
    }
}

#[async_trait]
impl AgentCollection for InMemoryAgentCollection {
    async fn get_agent_source(&self, agent_name: &str) -> Result<String> {
        let state = self.state.read();
        state
            .agents
            .get(&normalize_agent_name(agent_name))
            .filter(|agent| !agent.deleted)
            .map(|agent| agent.source.clone())
            .ok_or_else(|| Self::not_found(agent_name))
    }

    async fn list_agents(&self) -> Result<Vec<AgentIdentity>> {
        Ok(self.list_where(false))
    }

    async fn list_deleted_agents(&self) -> Result<Vec<AgentIdentity>> {
        Ok(self.list_where(true))
    }

    async fn create_agent(&self, source: &str) -> Result<AgentIdentity> {
        let title = parse_book(source).title.unwrap_or_default();
        let agent_name = agent_name_from_title(&title);

        let mut state = self.state.write();
        if state.agents.contains_key(&agent_name) {
            return Err(BookError::AlreadyExists { agent_name });
        }
        state.created += 1;
        let stored = StoredAgent {
            source: source.to_string(),
            permanent_id: Self::permanent_id_for(&agent_name, state.created),
            deleted: false,
        };
        let identity = stored.identity(&agent_name);
        state.agents.insert(agent_name, stored);

        tracing::debug!(agent = %identity.agent_name, "Created agent");
        Ok(identity)
    }

    async fn update_agent_source(&self, agent_name: &str, source: &str) -> Result<()> {
        let mut state = self.state.write();
        let agent = state
            .agents
            .get_mut(&normalize_agent_name(agent_name))
            .filter(|agent| !agent.deleted)
            .ok_or_else(|| Self::not_found(agent_name))?;
        agent.source = source.to_string();
        Ok(())
    }

    async fn delete_agent(&self, agent_name: &str) -> Result<()> {
        let mut state = self.state.write();
        let agent = state
            .agents
            .get_mut(&normalize_agent_name(agent_name))
            .filter(|agent| !agent.deleted)
            .ok_or_else(|| Self::not_found(agent_name))?;
        agent.deleted = true;
        Ok(())
    }

    async fn restore_agent(&self, agent_name: &str) -> Result<()> {
        let mut state = self.state.write();
        let agent = state
            .agents
            .get_mut(&normalize_agent_name(agent_name))
            .ok_or_else(|| Self::not_found(agent_name))?;
        if !agent.deleted {
            return Err(BookError::AlreadyExists {
                agent_name: agent_name.to_string(),
            });
        }
        agent.deleted = false;
        Ok(())
    }

    async fn get_agent_permanent_id(&self, agent_name: &str) -> Result<String> {
        let state = self.state.read();
        state
            .agents
            .get(&normalize_agent_name(agent_name))
            .filter(|agent| !agent.deleted)
            .map(|agent| agent.permanent_id.clone())
            .ok_or_else(|| Self::not_found(agent_name))
    }
}
