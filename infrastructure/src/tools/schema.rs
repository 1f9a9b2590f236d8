//! JSON Schema rendering of the tool catalog.
//!
//! Renders each `ToolDefinition` as a Gemini function declaration:
//! `{name, description, parameters: {type: "object", properties, required}}`.

use sandpiper_application::ports::tool_schema::ToolSchemaPort;
use sandpiper_domain::tool::entities::ToolDefinition;
use serde_json::{Value, json};

/// Converts catalog definitions into Gemini function declarations.
#[derive(Debug, Clone, Default)]
pub struct JsonSchemaToolConverter;

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let prop = match param.param_type.as_str() {
                "string_array" => json!({
                    "type": "array",
                    "items": { "type": "string" },
                    "description": param.description,
                }),
                _ => json!({
                    "type": "string",
                    "description": param.description,
                }),
            };
            properties.insert(param.name.clone(), prop);
            if param.required {
                required.push(Value::String(param.name.clone()));
            }
        }

        json!({
            "name": tool.name,
            "description": tool.description,
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
            },
        })
    }
}
