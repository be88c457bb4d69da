//! Late-bound tools declared by USE commitments.
//!
//! Compiling an agent only records which tools it wants. The functions behind
//! them are looked up in the hosting [`ToolEnvironment`] when the tool is
//! called, so agents compile in environments that lack some tools.

use crate::error::{BookError, Result};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Implementation of a tool provided by the host.
pub type ToolFunction = Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// Host-side lookup of tool implementations.
pub trait ToolEnvironment: Send + Sync {
    fn get_tool_function(&self, name: &str) -> Option<ToolFunction>;
}

/// Tool environment backed by a fixed map.
#[derive(Default, Clone)]
pub struct StaticToolEnvironment {
    functions: HashMap<String, ToolFunction>,
}

impl StaticToolEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool(mut self, name: impl Into<String>, function: ToolFunction) -> Self {
        self.functions.insert(name.into(), function);
        self
    }
}

impl ToolEnvironment for StaticToolEnvironment {
    fn get_tool_function(&self, name: &str) -> Option<ToolFunction> {
        self.functions.get(name).cloned()
    }
}

/// A tool the agent may call, with its JSON schema parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolBinding {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolBinding {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Call the tool through the environment.
    ///
    /// Fails with [`BookError::ToolUnavailable`] when the environment does not
    /// provide the function.
    pub async fn call(&self, environment: &dyn ToolEnvironment, arguments: Value) -> Result<Value> {
        let function = environment
            .get_tool_function(&self.name)
            .ok_or_else(|| BookError::ToolUnavailable {
                name: self.name.clone(),
            })?;
        function(arguments).await
    }
}
