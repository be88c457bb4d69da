//! Agent collection contract.
//!
//! Names are compared after [`normalize_agent_name`](crate::identity::normalize_agent_name),
//! so `Benjamin White` and `benjamin-white` address the same agent.

use crate::error::Result;
use crate::identity::AgentIdentity;
use async_trait::async_trait;

/// Async storage of agent sources.
#[async_trait]
pub trait AgentCollection: Send + Sync {
    /// Source of an active agent. Fails with `NotFound` for unknown or deleted agents.
    async fn get_agent_source(&self, agent_name: &str) -> Result<String>;

    async fn list_agents(&self) -> Result<Vec<AgentIdentity>>;

    async fn list_deleted_agents(&self) -> Result<Vec<AgentIdentity>>;

    /// Store a new agent named after its title.
    async fn create_agent(&self, source: &str) -> Result<AgentIdentity>;

    async fn update_agent_source(&self, agent_name: &str, source: &str) -> Result<()>;

    /// Soft delete; the agent can be restored.
    async fn delete_agent(&self, agent_name: &str) -> Result<()>;

    async fn restore_agent(&self, agent_name: &str) -> Result<()>;

    async fn get_agent_permanent_id(&self, agent_name: &str) -> Result<String>;
}
