//! Tool schema port
//!
//! Converts catalog definitions into the JSON shape the LLM transport
//! expects. The conversion is provider-specific, so it lives behind a port.

use sandpiper_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for rendering tool definitions as transport-level schemas.
pub trait ToolSchemaPort: Send + Sync {
    /// Render a single tool definition.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Render the whole catalog, in the spec's (lexicographic) order.
    fn catalog_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        spec.all().map(|t| self.tool_to_schema(t)).collect()
    }
}
