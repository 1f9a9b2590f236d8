//! Sandboxed tool implementations
//!
//! Concrete implementations of the four catalog tools, all confined to the
//! workspace root:
//!
//! - `dir`: `list_directory`
//! - `file`: `read_file`, `write_file`
//! - `script`: `run_script`
//!
//! [`SandboxedToolExecutor`] wires them behind the application layer's
//! `ToolExecutorPort`; [`JsonSchemaToolConverter`] renders the catalog for
//! the model.

pub mod dir;
pub mod file;
pub mod script;

mod executor;
mod schema;

pub use executor::{SandboxedToolExecutor, ToolLimits};
pub use schema::JsonSchemaToolConverter;

use sandpiper_domain::tool::entities::ToolSpec;

/// Create the tool specification with the full catalog.
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(dir::list_directory_definition())
        .register(file::read_file_definition())
        .register(file::write_file_definition())
        .register(script::run_script_definition())
}
