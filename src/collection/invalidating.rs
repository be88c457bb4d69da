//! Collection decorator that keeps the resolver cache honest.

use super::AgentCollection;
use crate::error::Result;
use crate::identity::AgentIdentity;
use crate::resolver::ResolverCache;
use async_trait::async_trait;
use std::sync::Arc;

/// Invalidates a [`ResolverCache`] after every successful mutation of the
/// wrapped collection.
pub struct InvalidatingAgentCollection {
    inner: Arc<dyn AgentCollection>,
    cache: Arc<ResolverCache>,
}

impl InvalidatingAgentCollection {
    pub fn new(inner: Arc<dyn AgentCollection>, cache: Arc<ResolverCache>) -> Self {
        Self { inner, cache }
    }

    fn invalidated<T>(&self, result: Result<T>) -> Result<T> {
        if result.is_ok() {
            self.cache.invalidate();
        }
        result
    }
}

#[async_trait]
impl AgentCollection for InvalidatingAgentCollection {
    async fn get_agent_source(&self, agent_name: &str) -> Result<String> {
        self.inner.get_agent_source(agent_name).await
    }

    async fn list_agents(&self) -> Result<Vec<AgentIdentity>> {
        self.inner.list_agents().await
    }

    async fn list_deleted_agents(&self) -> Result<Vec<AgentIdentity>> {
        self.inner.list_deleted_agents().await
    }

    async fn create_agent(&self, source: &str) -> Result<AgentIdentity> {
        let result = self.inner.create_agent(source).await;
        self.invalidated(result)
    }

    async fn update_agent_source(&self, agent_name: &str, source: &str) -> Result<()> {
        let result = self.inner.update_agent_source(agent_name, source).await;
        self.invalidated(result)
    }

    async fn delete_agent(&self, agent_name: &str) -> Result<()> {
        let result = self.inner.delete_agent(agent_name).await;
        self.invalidated(result)
    }

    async fn restore_agent(&self, agent_name: &str) -> Result<()> {
        let result = self.inner.restore_agent(agent_name).await;
        self.invalidated(result)
    }

    async fn get_agent_permanent_id(&self, agent_name: &str) -> Result<String> {
        self.inner.get_agent_permanent_id(agent_name).await
    }
}
