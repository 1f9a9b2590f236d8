//! Tool Executor port
//!
//! Defines the interface for executing tools against the sandboxed
//! workspace. The implementation injects the workspace root itself — it is
//! never part of a call's arguments.

use async_trait::async_trait;
use sandpiper_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    value_objects::ToolResult,
};

/// Port for tool execution
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().get(name).is_some()
    }

    /// Get the definition of a specific tool
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get(name)
    }

    /// Execute a tool call.
    ///
    /// Never fails at the trait level: unknown tools, invalid arguments, and
    /// operation failures are all reported inside the returned [`ToolResult`].
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}
