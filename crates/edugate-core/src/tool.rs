//! Tool abstractions - the surface exposed to an agent host

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::error::EdugateResult;

/// Static configuration of a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Unique tool name
    pub name: String,
    /// Description shown to the agent
    pub description: String,
    /// JSON schema for the tool arguments
    pub parameters: Value,
}

/// Tool definition advertised to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl From<&ToolConfig> for ToolDefinition {
    fn from(config: &ToolConfig) -> Self {
        Self {
            name: config.name.clone(),
            description: config.description.clone(),
            parameters: config.parameters.clone(),
        }
    }
}

/// Arguments supplied for one tool call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolInput {
    pub arguments: Value,
}

impl ToolInput {
    pub fn new(arguments: Value) -> Self {
        Self { arguments }
    }
}

/// Result of a tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub data: Value,
    pub error: Option<String>,
    pub execution_time_ms: u64,
}

impl ToolResult {
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data,
            error: None,
            execution_time_ms: 0,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Value::Null,
            error: Some(message.into()),
            execution_time_ms: 0,
        }
    }

    pub fn with_execution_time(mut self, elapsed_ms: u64) -> Self {
        self.execution_time_ms = elapsed_ms;
        self
    }
}

/// A callable tool
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool
    async fn execute(&self, input: ToolInput) -> EdugateResult<ToolResult>;

    /// Tool configuration
    fn config(&self) -> &ToolConfig;

    /// Definition advertised to the host
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::from(self.config())
    }
}

/// Executes tools by name
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute_tool(&self, name: &str, input: ToolInput) -> EdugateResult<ToolResult>;

    fn list_tools(&self) -> Vec<ToolDefinition>;
}

/// The remote school-management API, seen as `operation -> params -> result`
///
/// Implementations must be safe to call concurrently.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    async fn call(&self, operation: &str, params: Value) -> EdugateResult<Value>;
}

#[async_trait]
impl<T: RemoteClient + ?Sized> RemoteClient for Arc<T> {
    async fn call(&self, operation: &str, params: Value) -> EdugateResult<Value> {
        (**self).call(operation, params).await
    }
}
