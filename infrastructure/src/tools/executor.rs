//! Sandboxed tool executor — the concrete implementation of `ToolExecutorPort`.
//!
//! Owns the workspace root and injects it into every operation; the model
//! never supplies it. Dispatch is: catalog lookup (unknown name becomes an
//! `UnknownTool` result, not an error), argument validation, then the
//! operation itself.

use async_trait::async_trait;
use sandpiper_application::ports::tool_executor::ToolExecutorPort;
use sandpiper_domain::tool::{
    entities::{ToolCall, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
use sandpiper_domain::workspace::WorkspaceRoot;
use std::time::Duration;
use tracing::debug;

use super::{dir, file, script};

/// Per-operation limits, threaded from configuration.
#[derive(Debug, Clone)]
pub struct ToolLimits {
    /// Maximum character count returned by `read_file` before truncation.
    pub max_read_chars: usize,
    /// Wall-clock bound for `run_script` children.
    pub script_timeout: Duration,
}

impl Default for ToolLimits {
    fn default() -> Self {
        Self {
            max_read_chars: 10_000,
            script_timeout: Duration::from_secs(30),
        }
    }
}

/// Executor that runs the catalog tools against the local filesystem,
/// confined to one workspace root.
#[derive(Debug, Clone)]
pub struct SandboxedToolExecutor {
    root: WorkspaceRoot,
    tool_spec: ToolSpec,
    limits: ToolLimits,
}

impl SandboxedToolExecutor {
    /// Create an executor with the full catalog and default limits.
    pub fn new(root: WorkspaceRoot) -> Self {
        Self {
            root,
            tool_spec: super::default_tool_spec(),
            limits: ToolLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ToolLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The root every operation is confined to.
    pub fn root(&self) -> &WorkspaceRoot {
        &self.root
    }

    fn execute_internal(&self, call: &ToolCall) -> ToolResult {
        let definition = match self.tool_spec.get(&call.tool_name) {
            Some(d) => d,
            None => {
                return ToolResult::failure(
                    &call.tool_name,
                    ToolError::unknown_tool(&call.tool_name),
                );
            }
        };

        if let Err(e) = DefaultToolValidator.validate(call, definition) {
            return ToolResult::failure(&call.tool_name, ToolError::invalid_argument(e));
        }

        debug!(tool = %call.tool_name, "Executing tool");

        match call.tool_name.as_str() {
            dir::LIST_DIRECTORY => dir::execute_list_directory(&self.root, call),
            file::READ_FILE => file::execute_read_file(&self.root, call, self.limits.max_read_chars),
            file::WRITE_FILE => file::execute_write_file(&self.root, call),
            script::RUN_SCRIPT => script::execute_run_script(&self.root, call, self.limits.script_timeout),
            _ => ToolResult::failure(&call.tool_name, ToolError::unknown_tool(&call.tool_name)),
        }
    }
}

#[async_trait]
impl ToolExecutorPort for SandboxedToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        self.execute_internal(call)
    }
}
