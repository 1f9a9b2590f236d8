//! Infrastructure layer for sandpiper
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the sandboxed local tool executor, the Gemini HTTP
//! gateway, and configuration file loading.

pub mod config;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, LimitsConfig, ModelConfig, WorkspaceConfig};
pub use providers::gemini::{API_KEY_ENV, GeminiGateway};
pub use tools::{JsonSchemaToolConverter, SandboxedToolExecutor, ToolLimits, default_tool_spec};
