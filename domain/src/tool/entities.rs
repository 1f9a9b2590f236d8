//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Definition of a tool the model may invoke.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "read_file")
    pub name: String,
    /// Human-readable description exposed to the model
    pub description: String,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool.
///
/// `param_type` is a hint for schema generation: `"string"` or
/// `"string_array"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub param_type: String,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }
}

/// The static tool catalog.
///
/// Maps invocation names to definitions. Iteration order is the lexicographic
/// name order, so the schema the model sees is reproducible run to run.
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: BTreeMap<String, ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self {
            tools: BTreeMap::new(),
        }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// A model-issued invocation of one catalog tool.
///
/// Ephemeral — one per dispatch. The `native_id` correlates the call with its
/// result when the model issues several calls in a single round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: HashMap<String, serde_json::Value>,
    /// Identifier assigned by the transport for result correlation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_id: Option<String>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: HashMap::new(),
            native_id: None,
        }
    }

    /// Build a call from a transport-level tool-use block.
    pub fn from_native(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            tool_name: name.into(),
            arguments,
            native_id: Some(id.into()),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }

    /// Get an optional sequence-of-strings argument.
    ///
    /// Non-string elements are skipped; an absent key yields an empty vector.
    pub fn get_string_array(&self, key: &str) -> Vec<String> {
        self.arguments
            .get(key)
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definition_builder() {
        let tool = ToolDefinition::new("read_file", "Read file contents").with_parameter(
            ToolParameter::new("file_path", "File path to read", true),
        );

        assert_eq!(tool.name, "read_file");
        assert_eq!(tool.parameters.len(), 1);
        assert!(tool.parameters[0].required);
        assert_eq!(tool.parameters[0].param_type, "string");
    }

    #[test]
    fn test_tool_spec_lookup() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("read_file", "Read file"))
            .register(ToolDefinition::new("write_file", "Write file"));

        assert_eq!(spec.len(), 2);
        assert!(spec.get("read_file").is_some());
        assert!(spec.get("unknown").is_none());
    }

    #[test]
    fn test_tool_spec_iterates_in_name_order() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("write_file", "Write file"))
            .register(ToolDefinition::new("list_directory", "List"))
            .register(ToolDefinition::new("read_file", "Read file"));

        let names: Vec<_> = spec.names().collect();
        assert_eq!(names, vec!["list_directory", "read_file", "write_file"]);
    }

    #[test]
    fn test_tool_call_accessors() {
        let call = ToolCall::new("run_script")
            .with_arg("file_path", "main.py")
            .with_arg("args", serde_json::json!(["1", "2", 3]));

        assert_eq!(call.get_string("file_path"), Some("main.py"));
        assert_eq!(call.require_string("file_path").unwrap(), "main.py");
        assert!(call.require_string("missing").is_err());
        // the non-string element is skipped
        assert_eq!(call.get_string_array("args"), vec!["1", "2"]);
        assert!(call.get_string_array("absent").is_empty());
    }

    #[test]
    fn test_tool_call_from_native() {
        let mut args = HashMap::new();
        args.insert("file_path".to_string(), serde_json::json!("a.txt"));
        let call = ToolCall::from_native("call-1", "read_file", args);

        assert_eq!(call.tool_name, "read_file");
        assert_eq!(call.native_id.as_deref(), Some("call-1"));
        assert_eq!(call.get_string("file_path"), Some("a.txt"));
    }
}
